//! API error types and their HTTP mapping.
//!
//! ```text
//! ValidationError(s)  → 422 + per-field detail
//! Malformed input     → 422 + reason
//! DbError::NotFound   → 404
//! Other DbError       → 500 with a generic body (detail only logged -
//!                       internal errors never leak to clients)
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::error;

use cardfolio_core::ValidationError;
use cardfolio_db::DbError;

/// Unified error type for route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Field validation failed; carries per-field detail.
    Validation(Vec<ValidationError>),

    /// Request shape could not be parsed (query string or JSON body).
    Unprocessable(String),

    /// Referenced entity does not exist.
    NotFound(String),

    /// Backing store or other internal failure.
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let detail: Vec<_> = errors
                    .iter()
                    .map(|err| {
                        json!({
                            "field": err.field(),
                            "message": err.to_string(),
                        })
                    })
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "error": "validation failed", "detail": detail })),
                )
                    .into_response()
            }

            ApiError::Unprocessable(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": message })),
            )
                .into_response(),

            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": message })),
            )
                .into_response(),

            ApiError::Internal(message) => {
                // Log the detail, return a generic body
                error!(%message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
