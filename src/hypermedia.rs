//! Media-type negotiation and absolute URL construction.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use serde::Serialize;

use libris_http::{AppError, AppResult};

use crate::state::AppState;

/// Accept value that switches collection and root responses to hypermedia.
pub const HATEOAS_MEDIA_TYPE: &str = "application/vnd.marvin.hateoas+json";

/// Content type of the full author creation body.
pub const AUTHOR_FULL_MEDIA_TYPE: &str = "application/vnd.marvin.author.full+json";

/// Content type of the author creation body carrying a date of death.
pub const AUTHOR_WITH_DATE_OF_DEATH_MEDIA_TYPE: &str =
    "application/vnd.marvin.authorwithdateofdeath.full+json";

/// Media type of a header value without parameters, lowercased.
pub fn essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether the request asked for the hypermedia representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptsHypermedia(pub bool);

impl AcceptsHypermedia {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let requested = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .any(|media_type| essence(media_type) == HATEOAS_MEDIA_TYPE);
        Self(requested)
    }
}

impl<S> FromRequestParts<S> for AcceptsHypermedia
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Builds absolute hrefs for links and `Location` headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlHelper {
    base: String,
}

impl UrlHelper {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn link(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Absolute URL of `path` with `query` serialized as its query string.
    pub fn link_with_query<Q: Serialize>(&self, path: &str, query: &Q) -> AppResult<String> {
        let query = serde_urlencoded::to_string(query)
            .map_err(|error| AppError::Internal(error.into()))?;
        if query.is_empty() {
            Ok(self.link(path))
        } else {
            Ok(format!("{}?{}", self.link(path), query))
        }
    }
}

impl FromRequestParts<AppState> for UrlHelper {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let server = &state.settings.server;
        if let Some(public_url) = server.public_url.as_deref() {
            return Ok(Self::new(public_url));
        }

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| server.bind_address());
        Ok(Self::new(format!("http://{}", host)))
    }
}
