pub mod handlers;
pub mod links;
pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use libris_kernel::{InitCtx, Module};

use crate::state::AppState;

/// Authors collection and single-author resources
pub struct AuthorsModule {
    state: AppState,
}

impl AuthorsModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
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
            .route(
                "/",
                get(handlers::get_authors).post(handlers::create_author),
            )
            .route(
                "/{author_id}",
                get(handlers::get_author)
                    .post(handlers::block_author_creation)
                    .delete(handlers::delete_author),
            )
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List authors",
                        "tags": ["Authors"],
                        "parameters": [
                            { "name": "pageNumber", "in": "query", "schema": { "type": "integer", "minimum": 1 } },
                            { "name": "pageSize", "in": "query", "schema": { "type": "integer", "minimum": 1, "maximum": 20 } },
                            { "name": "genre", "in": "query", "schema": { "type": "string" } },
                            { "name": "searchQuery", "in": "query", "schema": { "type": "string" } },
                            { "name": "orderBy", "in": "query", "schema": { "type": "string", "default": "Name" } },
                            { "name": "fields", "in": "query", "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": {
                                "description": "One page of shaped authors; paging metadata in X-Pagination",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Author" } }
                                    },
                                    "application/vnd.marvin.hateoas+json": {
                                        "schema": { "type": "object" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Unknown sort field, shaping field or paging value",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create an author with its books",
                        "tags": ["Authors"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/AuthorForCreation" }
                                },
                                "application/vnd.marvin.author.full+json": {
                                    "schema": { "$ref": "#/components/schemas/AuthorForCreation" }
                                },
                                "application/vnd.marvin.authorwithdateofdeath.full+json": {
                                    "schema": { "$ref": "#/components/schemas/AuthorForCreation" }
                                }
                            }
                        },
                        "responses": {
                            "201": { "description": "Author created" },
                            "400": { "description": "Missing or malformed body" },
                            "415": { "description": "Unsupported content type" },
                            "422": { "description": "A nested book failed validation" }
                        }
                    }
                },
                "/{author_id}": {
                    "get": {
                        "summary": "Get an author, or several with a parenthesised id list",
                        "tags": ["Authors"],
                        "parameters": [
                            { "name": "author_id", "in": "path", "required": true, "schema": { "type": "string" } },
                            { "name": "fields", "in": "query", "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": { "description": "Shaped author with links" },
                            "400": { "description": "Malformed id or unknown field" },
                            "404": { "description": "Author not found" }
                        }
                    },
                    "post": {
                        "summary": "Rejected: authors cannot be created under a chosen id",
                        "tags": ["Authors"],
                        "responses": {
                            "404": { "description": "Author not found" },
                            "409": { "description": "Author already exists" }
                        }
                    },
                    "delete": {
                        "summary": "Delete an author and its books",
                        "tags": ["Authors"],
                        "responses": {
                            "204": { "description": "Author deleted" },
                            "404": { "description": "Author not found" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "Id": { "type": "string", "format": "uuid" },
                            "Name": { "type": "string" },
                            "Age": { "type": "integer" },
                            "Genre": { "type": "string" }
                        }
                    },
                    "AuthorForCreation": {
                        "type": "object",
                        "properties": {
                            "firstName": { "type": "string" },
                            "lastName": { "type": "string" },
                            "dateOfBirth": { "type": "string", "format": "date-time" },
                            "dateOfDeath": { "type": "string", "format": "date-time" },
                            "genre": { "type": "string" },
                            "books": { "type": "array", "items": { "$ref": "#/components/schemas/BookForCreation" } }
                        },
                        "required": ["firstName", "lastName", "dateOfBirth", "genre"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

/// Create a new instance of the authors module
pub fn create_module(state: AppState) -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(state))
}
