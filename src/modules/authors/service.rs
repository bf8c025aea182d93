use std::sync::Arc;

use authorbook_db::{Author, AuthorStore, StoreError};

use crate::error::{ServiceError, ServiceResult};
use crate::validation;

/// Author lifecycle: validation in front of the author store.
#[derive(Clone)]
pub struct AuthorService {
    store: Arc<dyn AuthorStore>,
}

impl AuthorService {
    pub fn new(store: Arc<dyn AuthorStore>) -> Self {
        Self { store }
    }

    /// Validate and insert a new author, returning it with its assigned id.
    pub async fn post(&self, author: Author) -> ServiceResult<Author> {
        validation::check_author(&author).inspect_err(|e| {
            tracing::warn!(error = %e, "author rejected");
        })?;

        let id = self.store.create(&author).await.map_err(|e| {
            tracing::warn!(error = %e, "author insert failed");
            ServiceError::Persistence(e)
        })?;

        if id <= 0 {
            tracing::warn!(author_id = id, "author store returned a non-positive id");
            return Err(ServiceError::Persistence(StoreError::backend(format!(
                "author store returned invalid id {id}"
            ))));
        }

        tracing::debug!(author_id = id, "author created");
        Ok(Author {
            author_id: id,
            ..author
        })
    }

    /// Replace every field of an existing author.
    pub async fn put(&self, author: Author, id: i64) -> ServiceResult<Author> {
        validation::check_author(&author).inspect_err(|e| {
            tracing::warn!(author_id = id, error = %e, "author rejected");
        })?;

        let existing = match self.store.find_by_id(id).await {
            Ok(existing) => existing,
            Err(StoreError::NotFound) => return Err(missing(id)),
            Err(e) => return Err(ServiceError::Persistence(e)),
        };
        if existing.author_id != id {
            return Err(missing(id));
        }

        self.store.update(&author, id).await.map_err(|e| {
            tracing::warn!(author_id = id, error = %e, "author update failed");
            ServiceError::Persistence(e)
        })?;

        tracing::debug!(author_id = id, "author updated");
        Ok(Author {
            author_id: id,
            ..author
        })
    }

    /// Physically remove an author. Their books are left in place.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if id < 0 {
            return Err(ServiceError::invalid_input(format!("invalid author id {id}")));
        }

        let removed = self.store.delete(id).await?;
        if removed == 0 {
            return Err(missing(id));
        }

        tracing::debug!(author_id = id, "author deleted");
        Ok(())
    }
}

fn missing(id: i64) -> ServiceError {
    ServiceError::not_found(format!("author {id} does not exist"))
}
