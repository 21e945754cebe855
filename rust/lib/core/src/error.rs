use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Clients match on these,
// never on the human-readable message string.

/// Stable error code constants.
///
/// Clients should match on `code` from `{"code": "NOT_FOUND", "message": "..."}`.
/// Codes never change; messages may be reworded.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type returned by every record endpoint.
///
/// Each variant maps to a stable error code (see [`error_code`]) and an
/// HTTP status code. The JSON response always includes both:
///
/// ```json
/// {"code": "NOT_FOUND", "message": "User not found"}
/// ```
///
/// Validation failures additionally carry the per-field messages:
///
/// ```json
/// {"code": "VALIDATION_FAILED", "message": "validation failed",
///  "errors": {"name": "Name is required"}}
/// ```
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Record does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Candidate record failed the rule set. HTTP 400.
    #[error("{message}")]
    Validation {
        message: String,
        errors: BTreeMap<String, String>,
    },

    /// Request could not be interpreted (malformed id or body). HTTP 400.
    #[error("{0}")]
    BadRequest(String),

    /// Record store rejected the operation. HTTP 400.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Build a validation error from per-field messages.
    pub fn validation(errors: BTreeMap<String, String>) -> Self {
        ServiceError::Validation {
            message: "validation failed".to_string(),
            errors,
        }
    }

    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Validation { .. } => error_code::VALIDATION_FAILED,
            ServiceError::BadRequest(_) => error_code::BAD_REQUEST,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error.
    pub fn to_json(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        });
        if let ServiceError::Validation { errors, .. } = self {
            body["errors"] = serde_json::json!(errors);
        }
        body
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, axum::Json(self.to_json())).into_response()
    }
}
