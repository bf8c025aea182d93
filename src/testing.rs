//! Store fakes: in-memory tables that record every call and can be told to
//! fail or misbehave per operation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use authorbook_db::memory::{InMemoryAuthorStore, InMemoryBookStore};
use authorbook_db::{Author, AuthorStore, Book, BookStore, StoreError, StoreResult};

#[derive(Default)]
struct Script {
    calls: Vec<&'static str>,
    failures: HashMap<&'static str, StoreError>,
    returns: HashMap<&'static str, i64>,
}

impl Script {
    /// Record `op` and report an injected failure or scripted return value.
    fn enter(&mut self, op: &'static str) -> StoreResult<Option<i64>> {
        self.calls.push(op);
        if let Some(err) = self.failures.get(op) {
            return Err(err.clone());
        }
        Ok(self.returns.get(op).copied())
    }
}

#[derive(Default, Clone)]
pub struct Recorder {
    script: Arc<Mutex<Script>>,
}

impl Recorder {
    pub fn fail(&self, op: &'static str, err: StoreError) {
        self.script.lock().unwrap().failures.insert(op, err);
    }

    /// Make `op` return `value` instead of touching the table.
    pub fn returns(&self, op: &'static str, value: i64) {
        self.script.lock().unwrap().returns.insert(op, value);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls().iter().filter(|call| **call == op).count()
    }

    fn enter(&self, op: &'static str) -> StoreResult<Option<i64>> {
        self.script.lock().unwrap().enter(op)
    }
}

#[derive(Default)]
pub struct FakeAuthorStore {
    table: InMemoryAuthorStore,
    pub recorder: Recorder,
}

impl FakeAuthorStore {
    /// Insert without recording the call.
    pub async fn seed(&self, first_name: &str) -> Author {
        let author = Author {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            dob: "20/01/1990".to_string(),
            pen_name: format!("{first_name}-pen"),
            ..Author::default()
        };
        let id = self.table.create(&author).await.unwrap();
        Author {
            author_id: id,
            ..author
        }
    }
}

#[async_trait]
impl AuthorStore for FakeAuthorStore {
    async fn create(&self, author: &Author) -> StoreResult<i64> {
        match self.recorder.enter("create")? {
            Some(id) => Ok(id),
            None => self.table.create(author).await,
        }
    }

    async fn update(&self, author: &Author, id: i64) -> StoreResult<i64> {
        match self.recorder.enter("update")? {
            Some(id) => Ok(id),
            None => self.table.update(author, id).await,
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        match self.recorder.enter("delete")? {
            Some(rows) => Ok(rows.max(0) as u64),
            None => self.table.delete(id).await,
        }
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Author> {
        self.recorder.enter("find_by_id")?;
        self.table.find_by_id(id).await
    }
}

#[derive(Default)]
pub struct FakeBookStore {
    table: InMemoryBookStore,
    pub recorder: Recorder,
}

impl FakeBookStore {
    /// Insert without recording the call.
    pub async fn seed(&self, author_id: i64, title: &str) -> Book {
        let book = Book {
            author_id,
            title: title.to_string(),
            publication: "Scholastic".to_string(),
            published_date: "05/06/1999".to_string(),
            ..Book::default()
        };
        let id = self.table.create(&book).await.unwrap();
        Book { book_id: id, ..book }
    }
}

#[async_trait]
impl BookStore for FakeBookStore {
    async fn list_all(&self) -> StoreResult<Vec<Book>> {
        self.recorder.enter("list_all")?;
        self.table.list_all().await
    }

    async fn list_by_title(&self, title: &str) -> StoreResult<Vec<Book>> {
        self.recorder.enter("list_by_title")?;
        self.table.list_by_title(title).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Book> {
        self.recorder.enter("find_by_id")?;
        self.table.find_by_id(id).await
    }

    async fn create(&self, book: &Book) -> StoreResult<i64> {
        match self.recorder.enter("create")? {
            Some(id) => Ok(id),
            None => self.table.create(book).await,
        }
    }

    async fn update(&self, book: &Book, id: i64) -> StoreResult<u64> {
        match self.recorder.enter("update")? {
            Some(rows) => Ok(rows.max(0) as u64),
            None => self.table.update(book, id).await,
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        match self.recorder.enter("delete")? {
            Some(rows) => Ok(rows.max(0) as u64),
            None => self.table.delete(id).await,
        }
    }
}

pub fn fakes() -> (Arc<FakeAuthorStore>, Arc<FakeBookStore>) {
    (
        Arc::new(FakeAuthorStore::default()),
        Arc::new(FakeBookStore::default()),
    )
}
