//! API error types with JSON responses.
//!
//! Every error reaches the client as `{ "message": "..." }`; the HTTP status
//! is the only machine-readable signal. Missing entities are reported as
//! 400, not 404.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notes_store::StoreError;
use serde::Serialize;

/// Message returned for failures whose details stay in the logs.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed required fields (400).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced entity does not exist (400).
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness or author-resolution conflict (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store refused the write (400).
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// Store error. Anything unexpected here surfaces as a 500.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::NotFound(_) | Self::Persistence(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(e) => match e {
                StoreError::DuplicateTitle(_) => StatusCode::CONFLICT,
                StoreError::InvalidRecord(_) | StoreError::NoteNotFound(_) => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// The message shown to the client.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::Persistence(msg) => msg.clone(),
            Self::Store(e) => match e {
                StoreError::DuplicateTitle(_) => "Duplicate note title".to_string(),
                StoreError::InvalidRecord(_) => "Invalid details.".to_string(),
                StoreError::NoteNotFound(_) => "Note not found.".to_string(),
                _ => INTERNAL_MESSAGE.to_string(),
            },
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorResponse {
            message: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use notes_core::NoteId;

    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        for err in [
            ApiError::Validation("All fields are required.".into()),
            ApiError::NotFound("Note not found.".into()),
            ApiError::Persistence("Invalid details.".into()),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_conflict_status() {
        let err = ApiError::Conflict("Author not found".into());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.message(), "Author not found");
    }

    #[test]
    fn test_store_errors_map_to_domain_messages() {
        let dup = ApiError::from(StoreError::DuplicateTitle("Groceries".into()));
        assert_eq!(dup.status_code(), StatusCode::CONFLICT);
        assert_eq!(dup.message(), "Duplicate note title");

        let invalid = ApiError::from(StoreError::InvalidRecord("title is empty".into()));
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message(), "Invalid details.");

        let gone = ApiError::from(StoreError::NoteNotFound(NoteId::new()));
        assert_eq!(gone.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(gone.message(), "Note not found.");
    }

    #[test]
    fn test_unexpected_store_errors_are_sanitized() {
        let err = ApiError::from(StoreError::ConfigError("secret dsn".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), INTERNAL_MESSAGE);
        assert!(!err.message().contains("secret"));
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorResponse {
            message: "No notes found.".into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "No notes found." }));
    }
}
