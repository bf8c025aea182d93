//! Persistence ports consumed by the domain services.
//!
//! Every method is async; dropping the returned future abandons the
//! underlying statement, which is how a caller deadline propagates.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Author, Book};

/// Failure reported by a store backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The requested row does not exist.
    #[error("record not found")]
    NotFound,

    /// The backend gave up waiting (pool acquire or statement deadline).
    #[error("store operation timed out")]
    Timeout,

    /// Any other backend failure.
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Insert and return the new identifier.
    async fn create(&self, author: &Author) -> StoreResult<i64>;

    /// Replace every field of author `id`; returns `id`.
    async fn update(&self, author: &Author, id: i64) -> StoreResult<i64>;

    /// Remove author `id`; returns rows affected.
    async fn delete(&self, id: i64) -> StoreResult<u64>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Author>;
}

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list_all(&self) -> StoreResult<Vec<Book>>;

    /// Books whose title matches exactly.
    async fn list_by_title(&self, title: &str) -> StoreResult<Vec<Book>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Book>;

    /// Insert and return the new identifier, or `-1` when the backend could
    /// not produce one.
    async fn create(&self, book: &Book) -> StoreResult<i64>;

    /// Replace every stored field of book `id`; returns rows affected.
    async fn update(&self, book: &Book, id: i64) -> StoreResult<u64>;

    /// Remove book `id`; returns rows affected.
    async fn delete(&self, id: i64) -> StoreResult<u64>;
}
