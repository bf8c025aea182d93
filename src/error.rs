//! Domain failures and their HTTP rendering.

use authorbook_db::StoreError;
use authorbook_http::AppError;
use serde_json::json;
use thiserror::Error;

/// Failure returned by the domain services.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed payload or out-of-range id. Never worth retrying.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A book names an author that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("{0}")]
    NotFound(String),

    /// The store failed or answered with something unusable.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

impl ServiceError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_reference(author_id: i64) -> Self {
        Self::InvalidReference(format!("author {author_id} does not exist"))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(message) => AppError::bad_request(message),
            ServiceError::InvalidReference(message) => AppError::validation(
                vec![json!({"field": "authorID", "error": "unknown author"})],
                message,
            ),
            ServiceError::NotFound(message) => AppError::not_found(message),
            ServiceError::Persistence(StoreError::Timeout) => {
                AppError::unavailable(StoreError::Timeout.to_string())
            }
            ServiceError::Persistence(e) => {
                AppError::Internal(anyhow::Error::new(e).context("store call failed"))
            }
        }
    }
}
