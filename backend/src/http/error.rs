//! HTTP error handling and response types.
//!
//! [`AppError`] is the only place where failures become status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::models::FieldError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Fields that failed validation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            fields: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldError>) -> Self {
        self.fields = fields;
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request that is not tied to a field (bad path parameter, non-object body)
    BadRequest(String),
    /// Body is not well-formed JSON
    InvalidJson(String),
    /// One or more fields failed validation
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    /// Validation failure for a single field.
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            message: "Invalid example model".to_string(),
            fields: vec![FieldError::new(field, reason)],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::InvalidJson(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_JSON", "Request body is not valid JSON").with_details(msg),
            ),
            AppError::Validation { message, fields } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("VALIDATION_ERROR", message).with_fields(fields),
            ),
            AppError::Repository(e) => repository_error_response(e),
        };

        (status, Json(error)).into_response()
    }
}

fn repository_error_response(err: RepositoryError) -> (StatusCode, ApiError) {
    match err {
        RepositoryError::NotFound { message, .. } => {
            (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
        }
        RepositoryError::Validation {
            message, fields, ..
        } => (
            StatusCode::BAD_REQUEST,
            ApiError::new("VALIDATION_ERROR", message).with_fields(fields),
        ),
        other => {
            tracing::error!(error = %other, transient = other.is_transient(), "store error");
            let mut body = ApiError::new(
                "STORE_ERROR",
                "The data store could not complete the request",
            );
            if other.is_transient() {
                body = body.with_details("transient failure, the request may be retried");
            }
            (StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}
