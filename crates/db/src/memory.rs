//! In-memory store backend for local runs and tests.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::model::{Author, Book};
use crate::store::{AuthorStore, BookStore, StoreError, StoreResult};

/// Id-keyed table with a monotonically increasing id sequence starting at 1.
#[derive(Debug)]
struct Table<V> {
    rows: BTreeMap<i64, V>,
    next_id: i64,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<V: Clone> Table<V> {
    fn insert(&mut self, value: V) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, value);
        id
    }

    fn remove(&mut self, id: i64) -> u64 {
        u64::from(self.rows.remove(&id).is_some())
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("in-memory table lock poisoned")
}

#[derive(Debug, Default)]
pub struct InMemoryAuthorStore {
    inner: RwLock<Table<Author>>,
}

impl InMemoryAuthorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorStore for InMemoryAuthorStore {
    async fn create(&self, author: &Author) -> StoreResult<i64> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        let id = table.next_id;
        table.insert(Author {
            author_id: id,
            ..author.clone()
        });
        Ok(id)
    }

    async fn update(&self, author: &Author, id: i64) -> StoreResult<i64> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        // Matches an UPDATE statement: a missing row is not an error.
        if let Some(row) = table.rows.get_mut(&id) {
            *row = Author {
                author_id: id,
                ..author.clone()
            };
        }
        Ok(id)
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        Ok(table.remove(id))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Author> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        table.rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    inner: RwLock<Table<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Only the columns a SQL row would hold.
fn stored(book: &Book, id: i64) -> Book {
    Book {
        book_id: id,
        author: None,
        ..book.clone()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn list_all(&self) -> StoreResult<Vec<Book>> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn list_by_title(&self, title: &str) -> StoreResult<Vec<Book>> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table
            .rows
            .values()
            .filter(|book| book.title == title)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Book> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        table.rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create(&self, book: &Book) -> StoreResult<i64> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        let id = table.next_id;
        table.insert(stored(book, id));
        Ok(id)
    }

    async fn update(&self, book: &Book, id: i64) -> StoreResult<u64> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = stored(book, id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        Ok(table.remove(id))
    }
}
