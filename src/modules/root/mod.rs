//! API entry point listing the top-level actions.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use libris_kernel::Module;
use libris_query::Link;

use crate::hypermedia::{AcceptsHypermedia, UrlHelper};
use crate::modules::authors::links::AUTHORS_PATH;
use crate::state::AppState;

pub const ROOT_PATH: &str = "/api";

pub fn root_links(urls: &UrlHelper) -> Vec<Link> {
    vec![
        Link::new(urls.link(ROOT_PATH), "self", "GET"),
        Link::new(urls.link(AUTHORS_PATH), "authors", "GET"),
        Link::new(urls.link(AUTHORS_PATH), "create_author", "POST"),
    ]
}

async fn get_root(
    AcceptsHypermedia(hypermedia): AcceptsHypermedia,
    urls: UrlHelper,
) -> Response {
    if hypermedia {
        Json(root_links(&urls)).into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

pub struct RootModule {
    state: AppState,
}

impl RootModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for RootModule {
    fn name(&self) -> &'static str {
        "root"
    }

    fn base_path(&self) -> Option<String> {
        Some(ROOT_PATH.to_string())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(get_root))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Entry point links",
                        "tags": ["Root"],
                        "responses": {
                            "200": { "description": "Links, when application/vnd.marvin.hateoas+json is accepted" },
                            "204": { "description": "Any other representation" }
                        }
                    }
                }
            }
        }))
    }
}

pub fn create_module(state: AppState) -> Arc<dyn Module> {
    Arc::new(RootModule::new(state))
}
