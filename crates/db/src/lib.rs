//! Entities, persistence ports, and the store backends behind them.

pub mod memory;
pub mod model;
pub mod mysql;
pub mod store;

use std::sync::Arc;

use anyhow::Context;
use authorbook_kernel::settings::{DatabaseBackend, DatabaseSettings};

pub use model::{Author, Book};
pub use store::{AuthorStore, BookStore, StoreError, StoreResult};

/// The pair of store handles injected into the domain services.
#[derive(Clone)]
pub struct StoreSet {
    pub authors: Arc<dyn AuthorStore>,
    pub books: Arc<dyn BookStore>,
}

impl StoreSet {
    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            authors: Arc::new(memory::InMemoryAuthorStore::new()),
            books: Arc::new(memory::InMemoryBookStore::new()),
        }
    }

    /// Build the stores selected by configuration.
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        match settings.backend {
            DatabaseBackend::Memory => {
                tracing::info!(target: "authorbook-db", "using in-memory stores");
                Ok(Self::in_memory())
            }
            DatabaseBackend::Mysql => {
                let pool = mysql::connect(settings)
                    .await
                    .with_context(|| "failed to connect to MySQL")?;
                tracing::info!(
                    target: "authorbook-db",
                    max_connections = settings.max_connections,
                    "connected to MySQL"
                );
                Ok(Self {
                    authors: Arc::new(mysql::MySqlAuthorStore::new(pool.clone())),
                    books: Arc::new(mysql::MySqlBookStore::new(pool)),
                })
            }
        }
    }
}
