use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use authorbook_db::Book;
use authorbook_http::{
    extract::{Json, Path, Query},
    AppError,
};

use super::service::BookService;

/// Query string of the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    #[serde(default)]
    pub title: String,
    /// Only the exact string `"true"` turns enrichment on.
    #[serde(rename = "includeAuthor", default)]
    pub include_author: Option<String>,
}

impl ListBooksQuery {
    pub fn include_author(&self) -> bool {
        self.include_author.as_deref() == Some("true")
    }
}

pub async fn list_books(
    State(service): State<BookService>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<Vec<Book>>, AppError> {
    let include_author = query.include_author();
    Ok(Json(service.get_all(&query.title, include_author).await?))
}

pub async fn get_book(
    State(service): State<BookService>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(service.get_by_id(id).await?))
}

pub async fn create_book(
    State(service): State<BookService>,
    Json(book): Json<Book>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let created = service.post(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_book(
    State(service): State<BookService>,
    Path(id): Path<i64>,
    Json(book): Json<Book>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(service.put(book, id).await?))
}

pub async fn delete_book(
    State(service): State<BookService>,
    Path(id): Path<i64>,
) -> Result<Json<&'static str>, AppError> {
    service.delete(id).await?;
    Ok(Json("successfully deleted"))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "books module is healthy"
}
