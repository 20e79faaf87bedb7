//! Application error type mapping to HTTP status codes.
//!
//! All error responses share one JSON shape: `{"error": CODE, "message": ...}`.
//! Auth failures collapse to a uniform 401 so callers cannot tell which
//! check rejected the token.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use ada_types::error::{AuthError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failure.
    Auth(AuthError),
    /// Request validation error.
    Validation(String),
    /// Storage failure.
    Storage(RepositoryError),
    /// Generic internal error.
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Storage(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Auth(e) => {
                // Log the precise reason, return the uniform message.
                tracing::debug!(error = %e, "request rejected by auth");
                (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    "Invalid or missing bearer token".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Storage(RepositoryError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Session not found".to_string(),
            ),
            AppError::Storage(RepositoryError::Connection) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_UNAVAILABLE",
                "Storage is temporarily unavailable".to_string(),
            ),
            AppError::Storage(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                e.to_string(),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = json!({
            "error": code,
            "message": message,
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
