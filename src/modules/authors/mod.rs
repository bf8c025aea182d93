pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use authorbook_db::AuthorStore;
use authorbook_kernel::{InitCtx, Module};
use axum::{
    routing::{get, post, put},
    Router,
};
use serde_json::json;

pub use service::AuthorService;

/// Author create/replace/delete endpoints
pub struct AuthorsModule {
    service: AuthorService,
}

impl AuthorsModule {
    pub fn new(service: AuthorService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", post(routes::create_author))
            .route(
                "/{id}",
                put(routes::update_author).delete(routes::delete_author),
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
        let author = json!({
            "description": "Author",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Author" }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        }]);

        Some(json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Create an author",
                        "tags": ["Authors"],
                        "requestBody": author.clone(),
                        "responses": {
                            "201": author.clone(),
                            "400": error("Invalid author"),
                            "500": error("Store failure")
                        }
                    }
                },
                "/{id}": {
                    "put": {
                        "summary": "Replace an author",
                        "tags": ["Authors"],
                        "parameters": id_param.clone(),
                        "requestBody": author.clone(),
                        "responses": {
                            "200": author,
                            "400": error("Invalid author"),
                            "404": error("Author not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete an author",
                        "tags": ["Authors"],
                        "parameters": id_param,
                        "responses": {
                            "200": {
                                "description": "Deleted",
                                "content": {
                                    "application/json": { "schema": { "type": "string" } }
                                }
                            },
                            "400": error("Invalid id"),
                            "404": error("Author not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "authorID": { "type": "integer", "format": "int64" },
                            "firstName": { "type": "string" },
                            "lastName": { "type": "string" },
                            "DOB": { "type": "string", "description": "DD/MM/YYYY" },
                            "penName": { "type": "string" }
                        },
                        "required": ["firstName", "DOB"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

/// Create a new instance of the authors module
pub fn create_module(store: Arc<dyn AuthorStore>) -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(AuthorService::new(store)))
}
