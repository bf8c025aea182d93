//! Request-scoped middleware: request id context and deadline.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::request_id::RequestId;

use crate::error::AppError;

tokio::task_local! {
    static REQUEST_ID: String;
}

/// Id of the request currently being handled, if it was tagged upstream.
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(Clone::clone).ok()
}

/// Makes the `x-request-id` set by `SetRequestIdLayer` visible to error
/// responses produced anywhere below this layer.
pub async fn request_context(req: Request, next: Next) -> Response {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .map(str::to_string);

    match request_id {
        Some(request_id) => REQUEST_ID.scope(request_id, next.run(req)).await,
        None => next.run(req).await,
    }
}

/// Drops the inner future once `timeout` elapses and answers 408 with the
/// standard error body.
pub async fn deadline(State(timeout): State<Duration>, req: Request, next: Next) -> Response {
    match tokio::time::timeout(timeout, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "request deadline exceeded");
            AppError::request_timeout(format!(
                "request did not complete within {}ms",
                timeout.as_millis()
            ))
            .into_response()
        }
    }
}
