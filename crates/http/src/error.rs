//! Error handling for the Libris HTTP layer

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

use libris_db::RepositoryError;
use libris_query::QueryError;

/// Message returned for every unexpected server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected fault happened. Try again later.";

pub type AppResult<T> = Result<T, AppError>;

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub details: Vec<serde_json::Value>,
    pub message: String,
    pub code: String,
    pub trace_id: String,
    pub timestamp: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("conflict: {message}")]
    Conflict {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error("unsupported media type: {message}")]
    UnsupportedMediaType { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            code: "validation_error".to_string(),
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Conflict {
            details,
            code: "conflict".to_string(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// Create an unsupported media type error
    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::UnsupportedMediaType {
            message: message.into(),
            code: "unsupported_media_type".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryError> for AppError {
    fn from(error: QueryError) -> Self {
        if error.is_client_error() {
            AppError::bad_request(error.to_string())
        } else {
            AppError::Internal(error.into())
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::AuthorNotFound(_) | RepositoryError::BookNotFound(_) => {
                AppError::not_found(error.to_string())
            }
            RepositoryError::Query(query) => query.into(),
            other @ RepositoryError::WriteRejected(_) => AppError::Internal(other.into()),
        }
    }
}

/// Response for a handler that panicked: the generic internal-error envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "non-string panic payload".to_string()
    };

    AppError::Internal(anyhow::anyhow!("request handler panicked: {}", detail)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        let status = self.status();

        let (error_code, message, details) = match self {
            AppError::Validation {
                details,
                code,
                message,
            }
            | AppError::Conflict {
                details,
                code,
                message,
            } => (code, message, details),
            AppError::NotFound { message, code }
            | AppError::BadRequest { message, code }
            | AppError::UnsupportedMediaType { message, code } => (code, message, Vec::new()),
            AppError::Internal(error) => {
                tracing::error!(
                    error_id = %error_id,
                    error = ?error,
                    "unhandled request failure"
                );
                (
                    "internal_error".to_string(),
                    INTERNAL_ERROR_MESSAGE.to_string(),
                    Vec::new(),
                )
            }
        };

        if status.is_client_error() {
            tracing::warn!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                "request rejected"
            );
        }

        let body = ErrorBody {
            details,
            message,
            code: error_code,
            trace_id: error_id.to_string(),
            timestamp,
        };
        let error_response = json!({ "error": body });

        (status, Json(error_response)).into_response()
    }
}
