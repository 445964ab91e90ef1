//! Error types for the HTTP boundary.
//!
//! Handlers return [`ApiError`]; the status code and `{"error": ...}` body
//! are decided only when the error is turned into a response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::{ErrorResponse, QueryError};
use thiserror::Error;
use tracing::error;

/// Body message for pagination failures.
pub const INVALID_PAGINATION: &str = "Invalid pagination parameters";

/// Body message for a missing or blank slug.
pub const SLUG_REQUIRED: &str = "Project slug is required";

/// Body message for a slug segment that does not decode to text.
pub const INVALID_SLUG: &str = "Invalid project slug";

/// Body message for an unknown slug.
pub const PROJECT_NOT_FOUND: &str = "Project not found";

/// Body message for unexpected failures. Details stay in the server log.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Errors returned by request handlers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request parameters rejected
    #[error("{message}")]
    InvalidArgument { message: String },

    /// No such resource
    #[error("{message}")]
    NotFound { message: String },

    /// Request did not finish within the configured timeout
    #[error("{message}")]
    ServiceUnavailable { message: String },

    /// Unexpected failure
    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl ApiError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_pagination() -> Self {
        Self::invalid_argument(INVALID_PAGINATION)
    }

    pub fn slug_required() -> Self {
        Self::invalid_argument(SLUG_REQUIRED)
    }

    pub fn invalid_slug() -> Self {
        Self::invalid_argument(INVALID_SLUG)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn project_not_found() -> Self {
        Self::not_found(PROJECT_NOT_FOUND)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    fn to_status_and_payload(&self) -> (StatusCode, ErrorResponse) {
        match self {
            Self::InvalidArgument { message } => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(message.clone()))
            }
            Self::NotFound { message } => {
                (StatusCode::NOT_FOUND, ErrorResponse::new(message.clone()))
            }
            Self::ServiceUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new(message.clone()),
            ),
            Self::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(INTERNAL_ERROR),
            ),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::InvalidArgument { message } => Self::InvalidArgument { message },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal { ref detail } = self {
            error!("Request failed: {}", detail);
        }
        let (status, payload) = self.to_status_and_payload();
        (status, Json(payload)).into_response()
    }
}
