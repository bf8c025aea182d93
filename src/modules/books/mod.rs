pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use authorbook_db::{AuthorStore, BookStore};
use authorbook_kernel::{InitCtx, Module};
use axum::{routing::get, Router};
use serde_json::json;

pub use service::BookService;

/// Book endpoints, including author enrichment
pub struct BooksModule {
    service: BookService,
}

impl BooksModule {
    pub fn new(service: BookService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(routes::list_books).post(routes::create_book))
            .route(
                "/{id}",
                get(routes::get_book)
                    .put(routes::update_book)
                    .delete(routes::delete_book),
            )
            .route("/health", get(routes::health_check))
            .with_state(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let book = json!({
            "description": "Book",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Book" }
                }
            }
        });
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "title",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "includeAuthor",
                                "in": "query",
                                "required": false,
                                "description": "\"true\" attaches each book's author",
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "List of books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "422": error("A book references a missing author"),
                            "500": error("Store failure")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": book.clone(),
                        "responses": {
                            "201": book.clone(),
                            "400": error("Invalid book"),
                            "422": error("Unknown author")
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book with its author",
                        "tags": ["Books"],
                        "parameters": [id_param.clone()],
                        "responses": {
                            "200": book.clone(),
                            "400": error("Invalid id"),
                            "404": error("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "parameters": [id_param.clone()],
                        "requestBody": book.clone(),
                        "responses": {
                            "200": book,
                            "400": error("Invalid book"),
                            "404": error("Book not found"),
                            "422": error("Unknown author")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "responses": {
                            "200": {
                                "description": "Deleted",
                                "content": {
                                    "application/json": { "schema": { "type": "string" } }
                                }
                            },
                            "404": error("Book not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "bookID": { "type": "integer", "format": "int64" },
                            "authorID": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "publication": {
                                "type": "string",
                                "description": "Penguin, Scholastic or Arihant"
                            },
                            "publishedDate": { "type": "string", "description": "DD/MM/YYYY" },
                            "author": { "$ref": "#/components/schemas/Author" }
                        },
                        "required": ["authorID", "title", "publication", "publishedDate"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(books: Arc<dyn BookStore>, authors: Arc<dyn AuthorStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(BookService::new(books, authors)))
}
