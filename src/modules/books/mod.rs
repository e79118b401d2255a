pub mod handlers;
pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use libris_kernel::{InitCtx, Module};

use crate::state::AppState;

/// Books nested under their author
pub struct BooksModule {
    state: AppState,
}

impl BooksModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    fn base_path(&self) -> Option<String> {
        Some("/api/authors/{author_id}/books".to_string())
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
            .route(
                "/",
                get(handlers::get_books_for_author).post(handlers::create_book_for_author),
            )
            .route(
                "/{book_id}",
                get(handlers::get_book_for_author)
                    .put(handlers::update_book_for_author)
                    .patch(handlers::partially_update_book_for_author)
                    .delete(handlers::delete_book_for_author),
            )
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = serde_json::json!({
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        });

        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List the books of an author",
                        "tags": ["Books"],
                        "responses": {
                            "200": { "description": "Books ordered by title, with links" },
                            "404": { "description": "Author not found", "content": error }
                        }
                    },
                    "post": {
                        "summary": "Add a book to an author",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookForCreation" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Book created",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "400": { "description": "Missing body or unknown author", "content": error },
                            "422": { "description": "Validation failed", "content": error }
                        }
                    }
                },
                "/{book_id}": {
                    "get": {
                        "summary": "Get a book of an author",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "The book with links",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "404": { "description": "Author or book not found", "content": error }
                        }
                    },
                    "put": {
                        "summary": "Replace a book, creating it under this id if missing",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookForUpdate" }
                                }
                            }
                        },
                        "responses": {
                            "201": { "description": "Book created" },
                            "204": { "description": "Book replaced" },
                            "400": { "description": "Missing body or unknown author", "content": error },
                            "422": { "description": "Validation failed", "content": error }
                        }
                    },
                    "patch": {
                        "summary": "Apply a JSON Patch to a book, creating it if missing",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json-patch+json": {
                                    "schema": { "type": "array", "items": { "type": "object" } }
                                }
                            }
                        },
                        "responses": {
                            "201": { "description": "Book created" },
                            "204": { "description": "Book patched" },
                            "400": { "description": "Malformed patch", "content": error },
                            "404": { "description": "Author not found", "content": error },
                            "422": { "description": "Validation failed", "content": error }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book of an author",
                        "tags": ["Books"],
                        "responses": {
                            "204": { "description": "Book deleted" },
                            "404": { "description": "Author or book not found", "content": error }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "format": "uuid" },
                            "title": { "type": "string" },
                            "description": { "type": ["string", "null"] },
                            "authorId": { "type": "string", "format": "uuid" },
                            "links": { "type": "array", "items": { "$ref": "#/components/schemas/Link" } }
                        },
                        "required": ["id", "title", "authorId", "links"]
                    },
                    "BookForCreation": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "maxLength": 100 },
                            "description": { "type": "string", "maxLength": 500 }
                        },
                        "required": ["title"]
                    },
                    "BookForUpdate": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "maxLength": 100 },
                            "description": { "type": "string", "maxLength": 500 }
                        },
                        "required": ["title", "description"]
                    },
                    "Link": {
                        "type": "object",
                        "properties": {
                            "href": { "type": "string" },
                            "rel": { "type": "string" },
                            "method": { "type": "string" }
                        },
                        "required": ["href", "rel", "method"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(state: AppState) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(state))
}
