//! Error types for catalog loading and queries.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the query engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Request parameters out of range
    #[error("{message}")]
    InvalidArgument { message: String },
}

impl QueryError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// InvalidArgument for a page/limit pair outside the accepted range.
    pub fn invalid_pagination(page: u32, limit: u32) -> Self {
        Self::invalid_argument(format!(
            "Invalid pagination parameters (page={page}, limit={limit})"
        ))
    }
}

/// Errors that can occur while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read the catalog file
    #[error("failed to read catalog '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON catalog
    #[error("failed to parse catalog '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse TOML catalog
    #[error("failed to parse catalog '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Embedded or in-memory JSON could not be decoded
    #[error("invalid catalog data: {0}")]
    Decode(#[from] serde_json::Error),

    /// A project has a blank name
    #[error("project at index {index} has an empty name")]
    EmptyName { index: usize },

    /// Two or more names map to the same slug
    #[error("slug '{slug}' is shared by projects: {}", names.join(", "))]
    SlugCollision { slug: String, names: Vec<String> },
}

impl CatalogError {
    /// Create a ReadFile error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a ParseJson error.
    pub fn parse_json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ParseJson {
            path: path.into(),
            source,
        }
    }

    /// Create a ParseToml error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pagination_message() {
        let err = QueryError::invalid_pagination(0, 6);
        assert!(err.to_string().contains("Invalid pagination parameters"));
        assert!(err.to_string().contains("page=0"));
    }

    #[test]
    fn test_slug_collision_display() {
        let err = CatalogError::SlugCollision {
            slug: "chat-app".to_string(),
            names: vec!["Chat App".to_string(), "chat app!".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "slug 'chat-app' is shared by projects: Chat App, chat app!"
        );
    }

    #[test]
    fn test_empty_name_display() {
        let err = CatalogError::EmptyName { index: 3 };
        assert!(err.to_string().contains("index 3"));
    }
}
