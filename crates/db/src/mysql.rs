//! MySQL store backend.
//!
//! Expects the following tables (schema management is not handled here):
//!
//! ```sql
//! CREATE TABLE author (
//!     author_id  INT AUTO_INCREMENT PRIMARY KEY,
//!     first_name VARCHAR(255) NOT NULL,
//!     last_name  VARCHAR(255) NOT NULL,
//!     dob        VARCHAR(10)  NOT NULL,
//!     pen_name   VARCHAR(255) NOT NULL
//! );
//! CREATE TABLE book (
//!     id             INT AUTO_INCREMENT PRIMARY KEY,
//!     author_id      INT NOT NULL,
//!     title          VARCHAR(255) NOT NULL,
//!     publication    VARCHAR(255) NOT NULL,
//!     published_date VARCHAR(10)  NOT NULL
//! );
//! ```
//!
//! `book.author_id` deliberately carries no foreign key; the book service
//! checks the reference itself.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;

use authorbook_kernel::settings::DatabaseSettings;

use crate::model::{Author, Book};
use crate::store::{AuthorStore, BookStore, StoreError, StoreResult};

/// Open a connection pool using the configured limits.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .connect(&settings.url)
        .await?;
    Ok(pool)
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::PoolTimedOut => StoreError::Timeout,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

fn author_from_row(row: &MySqlRow) -> Result<Author, sqlx::Error> {
    Ok(Author {
        author_id: row.try_get("author_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        dob: row.try_get("dob")?,
        pen_name: row.try_get("pen_name")?,
    })
}

fn book_from_row(row: &MySqlRow) -> Result<Book, sqlx::Error> {
    Ok(Book {
        book_id: row.try_get("id")?,
        author_id: row.try_get("author_id")?,
        title: row.try_get("title")?,
        publication: row.try_get("publication")?,
        published_date: row.try_get("published_date")?,
        author: None,
    })
}

#[derive(Debug, Clone)]
pub struct MySqlAuthorStore {
    pool: MySqlPool,
}

impl MySqlAuthorStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorStore for MySqlAuthorStore {
    async fn create(&self, author: &Author) -> StoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO author (first_name, last_name, dob, pen_name) VALUES (?, ?, ?, ?)",
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.dob)
        .bind(&author.pen_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::warn!(target: "authorbook-db", error = %e, "author insert failed");
            StoreError::from(e)
        })?;

        i64::try_from(result.last_insert_id())
            .map_err(|_| StoreError::backend("author id out of range"))
    }

    async fn update(&self, author: &Author, id: i64) -> StoreResult<i64> {
        sqlx::query(
            "UPDATE author SET first_name = ?, last_name = ?, dob = ?, pen_name = ? \
             WHERE author_id = ?",
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.dob)
        .bind(&author.pen_name)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::warn!(target: "authorbook-db", author_id = id, error = %e, "author update failed");
            StoreError::from(e)
        })?;

        Ok(id)
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM author WHERE author_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Author> {
        let row = sqlx::query(
            "SELECT author_id, first_name, last_name, dob, pen_name FROM author \
             WHERE author_id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(author_from_row(&row)?)
    }
}

const BOOK_COLUMNS: &str = "SELECT id, author_id, title, publication, published_date FROM book";

#[derive(Debug, Clone)]
pub struct MySqlBookStore {
    pool: MySqlPool,
}

impl MySqlBookStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for MySqlBookStore {
    async fn list_all(&self) -> StoreResult<Vec<Book>> {
        let rows = sqlx::query(BOOK_COLUMNS).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| book_from_row(row).map_err(StoreError::from))
            .collect()
    }

    async fn list_by_title(&self, title: &str) -> StoreResult<Vec<Book>> {
        let sql = format!("{BOOK_COLUMNS} WHERE title = ?");
        let rows = sqlx::query(&sql)
            .bind(title)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::warn!(target: "authorbook-db", error = %e, "book title query failed");
                StoreError::from(e)
            })?;
        rows.iter()
            .map(|row| book_from_row(row).map_err(StoreError::from))
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Book> {
        let sql = format!("{BOOK_COLUMNS} WHERE id = ?");
        let row = sqlx::query(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(book_from_row(&row)?)
    }

    async fn create(&self, book: &Book) -> StoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO book (author_id, title, publication, published_date) VALUES (?, ?, ?, ?)",
        )
        .bind(book.author_id)
        .bind(&book.title)
        .bind(&book.publication)
        .bind(&book.published_date)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::warn!(target: "authorbook-db", error = %e, "book insert failed");
            StoreError::from(e)
        })?;

        Ok(i64::try_from(result.last_insert_id()).unwrap_or(-1))
    }

    async fn update(&self, book: &Book, id: i64) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE book SET author_id = ?, title = ?, publication = ?, published_date = ? \
             WHERE id = ?",
        )
        .bind(book.author_id)
        .bind(&book.title)
        .bind(&book.publication)
        .bind(&book.published_date)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlx_errors_map_to_store_errors() {
        assert_eq!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::NotFound
        );
        assert_eq!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Timeout
        );
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolClosed),
            StoreError::Backend(_)
        ));
    }
}
