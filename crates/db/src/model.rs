use serde::{Deserialize, Serialize};

/// Author row as persisted by the stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Store-assigned identifier; `0` until the author is persisted.
    #[serde(rename = "authorID", default)]
    pub author_id: i64,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    /// Date of birth as `DD/MM/YYYY`.
    #[serde(rename = "DOB", default)]
    pub dob: String,
    #[serde(rename = "penName", default)]
    pub pen_name: String,
}

/// Book row, optionally carrying a snapshot of its author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "bookID", default)]
    pub book_id: i64,
    /// Reference to [`Author::author_id`]. Not enforced by any store.
    #[serde(rename = "authorID", default)]
    pub author_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub publication: String,
    /// Publication date as `DD/MM/YYYY`.
    #[serde(rename = "publishedDate", default)]
    pub published_date: String,
    /// Attached on read; never written to a store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}
