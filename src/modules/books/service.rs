use std::sync::Arc;

use authorbook_db::{Author, AuthorStore, Book, BookStore, StoreError};

use crate::error::{ServiceError, ServiceResult};
use crate::validation;

/// Book lifecycle plus the author reference check and author enrichment.
///
/// Checking the author and writing the book are two separate store calls;
/// an author deleted in between is not detected.
#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookStore>,
    authors: Arc<dyn AuthorStore>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookStore>, authors: Arc<dyn AuthorStore>) -> Self {
        Self { books, authors }
    }

    /// List books, optionally only those titled exactly `title`.
    ///
    /// With `include_author`, every book gets its author attached and a
    /// single failed lookup fails the whole listing.
    pub async fn get_all(&self, title: &str, include_author: bool) -> ServiceResult<Vec<Book>> {
        let mut books = if title.is_empty() {
            self.books.list_all().await?
        } else {
            self.books.list_by_title(title).await?
        };

        if include_author {
            for book in &mut books {
                book.author = Some(self.author_of(book).await?);
            }
        }

        tracing::debug!(count = books.len(), include_author, "books listed");
        Ok(books)
    }

    /// Fetch one book with its author attached.
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Book> {
        if id <= 0 {
            return Err(ServiceError::invalid_input(format!("invalid book id {id}")));
        }

        let mut book = match self.books.find_by_id(id).await {
            Ok(book) => book,
            Err(StoreError::NotFound) => return Err(missing(id)),
            Err(e) => return Err(ServiceError::Persistence(e)),
        };

        book.author = Some(self.author_of(&book).await?);
        Ok(book)
    }

    /// Validate, confirm the author exists, then insert.
    pub async fn post(&self, book: Book) -> ServiceResult<Book> {
        validation::check_book(&book).inspect_err(|e| {
            tracing::warn!(error = %e, "book rejected");
        })?;

        let author = self.confirm_author(book.author_id).await?;

        let id = self.books.create(&book).await.map_err(|e| {
            tracing::warn!(author_id = book.author_id, error = %e, "book insert failed");
            ServiceError::Persistence(e)
        })?;
        if id <= 0 {
            tracing::warn!(book_id = id, "book store returned a non-positive id");
            return Err(ServiceError::Persistence(StoreError::backend(format!(
                "book store returned invalid id {id}"
            ))));
        }

        tracing::debug!(book_id = id, author_id = author.author_id, "book created");
        Ok(Book {
            book_id: id,
            author: Some(author),
            ..book
        })
    }

    /// Validate, confirm the author exists, then replace book `id`.
    pub async fn put(&self, book: Book, id: i64) -> ServiceResult<Book> {
        validation::check_book(&book).inspect_err(|e| {
            tracing::warn!(book_id = id, error = %e, "book rejected");
        })?;

        let author = self.confirm_author(book.author_id).await?;

        let updated = self.books.update(&book, id).await.map_err(|e| {
            tracing::warn!(book_id = id, error = %e, "book update failed");
            ServiceError::Persistence(e)
        })?;
        if updated == 0 {
            return Err(missing(id));
        }

        tracing::debug!(book_id = id, author_id = author.author_id, "book updated");
        Ok(Book {
            book_id: id,
            author: Some(author),
            ..book
        })
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if id < 0 {
            return Err(ServiceError::invalid_input(format!("invalid book id {id}")));
        }

        let removed = self.books.delete(id).await?;
        if removed == 0 {
            return Err(missing(id));
        }

        tracing::debug!(book_id = id, "book deleted");
        Ok(())
    }

    /// Reference check performed before any book write.
    async fn confirm_author(&self, author_id: i64) -> ServiceResult<Author> {
        match self.authors.find_by_id(author_id).await {
            Ok(author) => Ok(author),
            Err(StoreError::NotFound) => {
                tracing::warn!(author_id, "book references unknown author");
                Err(ServiceError::invalid_reference(author_id))
            }
            Err(e) => Err(ServiceError::Persistence(e)),
        }
    }

    async fn author_of(&self, book: &Book) -> ServiceResult<Author> {
        self.confirm_author(book.author_id).await.inspect_err(|e| {
            tracing::warn!(
                book_id = book.book_id,
                author_id = book.author_id,
                error = %e,
                "author enrichment failed"
            );
        })
    }
}

fn missing(id: i64) -> ServiceError {
    ServiceError::not_found(format!("book {id} does not exist"))
}
