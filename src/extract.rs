//! Request extractors that reject with the shared error envelope.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use libris_http::{AppError, AppResult};

/// JSON request body that must be present and non-null.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        parse_json_body(&bytes).map(JsonBody)
    }
}

/// Parse a JSON body, treating an empty body or `null` as missing.
pub fn parse_json_body<T: DeserializeOwned>(bytes: &[u8]) -> AppResult<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::bad_request("a request body is required"));
    }

    match serde_json::from_slice::<Option<T>>(bytes) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(AppError::bad_request("a request body is required")),
        Err(error) => Err(AppError::bad_request(format!(
            "malformed request body: {}",
            error
        ))),
    }
}

/// Query-string parameters, rejected as a 400 envelope when malformed.
#[derive(Debug, Clone)]
pub struct ListQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ListQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        Ok(ListQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Shelf {
        label: String,
    }

    #[test]
    fn parses_present_body() {
        let shelf: Shelf = parse_json_body(br#"{"label":"fiction"}"#).unwrap();
        assert_eq!(shelf.label, "fiction");
    }

    #[test]
    fn empty_and_null_bodies_are_bad_requests() {
        let bodies: [&[u8]; 3] = [b"", b"  \n", b"null"];
        for body in bodies {
            let error = parse_json_body::<Shelf>(body).unwrap_err();
            assert!(matches!(error, AppError::BadRequest { .. }));
        }
    }

    #[test]
    fn malformed_body_is_a_bad_request() {
        let error = parse_json_body::<Shelf>(br#"{"label":"#).unwrap_err();
        assert!(matches!(error, AppError::BadRequest { .. }));
        let error = parse_json_body::<Shelf>(br#"{"shelf":"x"}"#).unwrap_err();
        assert!(matches!(error, AppError::BadRequest { .. }));
    }
}
