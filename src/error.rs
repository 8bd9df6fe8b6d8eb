//! Unified error type for the API surface
//!
//! Every handler returns `Result<_, AppError>`; the error is converted to a
//! JSON body `{"error": <text>}` with the matching status at the response
//! boundary. Storage and filesystem failures are logged server-side and
//! collapse to a generic 500.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input (400)
    #[error("{0}")]
    Validation(String),

    /// Upload rejected, extension outside the allowed set (400)
    #[error("{0}")]
    InvalidFileType(String),

    /// No or invalid session (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Referenced entity absent (404)
    #[error("{0} not found")]
    NotFound(String),

    /// Unexpected storage/filesystem failure (500), details stay server-side
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_file_type(message: impl Into<String>) -> Self {
        Self::InvalidFileType(message.into())
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized access".into())
    }

    pub fn invalid_credentials() -> Self {
        Self::Unauthorized("Invalid username or password".into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Log the underlying error and degrade to a generic 500.
    pub fn internal(e: impl std::fmt::Display) -> Self {
        tracing::error!(error = %e, "Internal error");
        Self::Internal
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidFileType(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::validation("missing").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::invalid_file_type("bad ext").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized().status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::not_found("Order").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(AppError::not_found("Menu item").to_string(), "Menu item not found");
    }

    #[test]
    fn test_internal_hides_details() {
        let err = AppError::internal("disk on fire");
        assert_eq!(err.to_string(), "Internal server error");
    }
}
