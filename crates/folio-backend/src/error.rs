//! Backend error types.

use thiserror::Error;

/// Errors that can occur during backend operations.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Query rejected by the engine
    #[error("{0}")]
    Query(#[from] folio_core::QueryError),

    /// Catalog loading failed
    #[error("catalog loading failed: {0}")]
    Catalog(#[from] folio_core::CatalogError),

    /// Remote server answered with a non-success status
    #[error("remote server error: {status} - {message}")]
    RemoteServer { status: u16, message: String },

    /// Connection error
    #[error("connection failed: {0}")]
    Connection(String),

    /// Response body did not have the expected shape
    #[error("Invalid response format from API: {0}")]
    InvalidResponse(String),

    /// Server URL could not be used as a base for endpoint paths
    #[error("invalid server URL '{0}'")]
    InvalidUrl(String),
}

impl BackendError {
    /// Create a RemoteServer error.
    pub fn remote_server(status: u16, message: impl Into<String>) -> Self {
        Self::RemoteServer {
            status,
            message: message.into(),
        }
    }

    /// Create a Connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create an InvalidResponse error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl(url.into())
    }

    /// HTTP status carried by this error, if it came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteServer { status, .. } => Some(*status),
            _ => None,
        }
    }
}
