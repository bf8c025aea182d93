use axum::{extract::State, http::StatusCode};

use authorbook_db::Author;
use authorbook_http::{
    extract::{Json, Path},
    AppError,
};

use super::service::AuthorService;

pub async fn create_author(
    State(service): State<AuthorService>,
    Json(author): Json<Author>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    let created = service.post(author).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_author(
    State(service): State<AuthorService>,
    Path(id): Path<i64>,
    Json(author): Json<Author>,
) -> Result<Json<Author>, AppError> {
    Ok(Json(service.put(author, id).await?))
}

pub async fn delete_author(
    State(service): State<AuthorService>,
    Path(id): Path<i64>,
) -> Result<Json<&'static str>, AppError> {
    service.delete(id).await?;
    Ok(Json("successfully deleted"))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "authors module is healthy"
}
