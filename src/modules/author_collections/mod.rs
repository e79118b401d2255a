//! Bulk creation and lookup of authors by id list.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use libris_db::NewAuthor;
use libris_http::{AppError, AppResult};
use libris_kernel::Module;

use crate::extract::JsonBody;
use crate::hypermedia::UrlHelper;
use crate::modules::authors::models::{AuthorDto, AuthorForCreationDto};
use crate::modules::books::models::BookForCreationDto;
use crate::state::AppState;

pub const AUTHOR_COLLECTIONS_PATH: &str = "/api/authorcollections";

/// Whether a path segment is a parenthesised id list such as `(id1,id2)`.
pub fn is_id_list(raw: &str) -> bool {
    let raw = raw.trim();
    raw.starts_with('(') && raw.ends_with(')')
}

/// Parse `(id1,id2,...)` (parentheses optional) into distinct ids, keeping
/// their first-seen order.
pub fn parse_ids(raw: &str) -> AppResult<Vec<Uuid>> {
    let raw = raw.trim();
    let inner = raw
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(raw);

    if inner.trim().is_empty() {
        return Err(AppError::bad_request("the id list is empty"));
    }

    let mut ids = Vec::new();
    for token in inner.split(',') {
        let id = Uuid::parse_str(token.trim())
            .map_err(|_| AppError::bad_request(format!("'{}' is not a valid id", token.trim())))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Authors of an id list, failing unless every id resolves.
pub async fn find_author_collection(state: &AppState, raw_ids: &str) -> AppResult<Vec<AuthorDto>> {
    let ids = parse_ids(raw_ids)?;
    let authors = state.repository.get_authors_by_ids(&ids).await?;

    if authors.len() != ids.len() {
        return Err(AppError::not_found(format!(
            "{} of {} requested authors exist",
            authors.len(),
            ids.len()
        )));
    }

    Ok(authors.iter().map(AuthorDto::from).collect())
}

async fn get_author_collection(
    State(state): State<AppState>,
    Path(ids): Path<String>,
) -> AppResult<Json<Vec<AuthorDto>>> {
    find_author_collection(&state, &ids).await.map(Json)
}

async fn create_author_collection(
    State(state): State<AppState>,
    urls: UrlHelper,
    JsonBody(authors): JsonBody<Vec<AuthorForCreationDto>>,
) -> AppResult<impl IntoResponse> {
    if authors.is_empty() {
        return Err(AppError::bad_request("at least one author is required"));
    }

    authors
        .iter()
        .flat_map(|author| author.books.iter())
        .try_for_each(BookForCreationDto::validate)?;

    let created = state
        .repository
        .add_authors(authors.into_iter().map(NewAuthor::from).collect())
        .await?;

    let ids = created
        .iter()
        .map(|author| author.id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let location = urls.link(&format!("{}/({})", AUTHOR_COLLECTIONS_PATH, ids));
    let body: Vec<AuthorDto> = created.iter().map(AuthorDto::from).collect();

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)))
}

pub struct AuthorCollectionsModule {
    state: AppState,
}

impl AuthorCollectionsModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for AuthorCollectionsModule {
    fn name(&self) -> &'static str {
        "authorcollections"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", post(create_author_collection))
            .route("/{ids}", get(get_author_collection))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Create several authors at once",
                        "tags": ["Author collections"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "type": "array", "items": { "$ref": "#/components/schemas/AuthorForCreation" } }
                                }
                            }
                        },
                        "responses": {
                            "201": { "description": "Authors created; Location lists their ids" },
                            "400": { "description": "Missing, empty or malformed body" },
                            "422": { "description": "A nested book failed validation" }
                        }
                    }
                },
                "/{ids}": {
                    "get": {
                        "summary": "Get authors by a parenthesised id list",
                        "tags": ["Author collections"],
                        "parameters": [
                            { "name": "ids", "in": "path", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": {
                                "description": "Every requested author",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Author" } }
                                    }
                                }
                            },
                            "400": { "description": "Malformed id list" },
                            "404": { "description": "At least one author is missing" }
                        }
                    }
                }
            }
        }))
    }
}

pub fn create_module(state: AppState) -> Arc<dyn Module> {
    Arc::new(AuthorCollectionsModule::new(state))
}
