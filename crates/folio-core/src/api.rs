//! Response envelopes shared by the HTTP service and its clients.

use serde::{Deserialize, Serialize};

use crate::project::Project;
use crate::query::{PaginationMeta, QueryResult};

/// `GET /api/projects` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub data: Vec<Project>,
    pub meta: PaginationMeta,
}

impl From<QueryResult> for ProjectsResponse {
    fn from(result: QueryResult) -> Self {
        Self {
            data: result.data,
            meta: result.meta,
        }
    }
}

impl From<ProjectsResponse> for QueryResult {
    fn from(response: ProjectsResponse) -> Self {
        Self {
            data: response.data,
            meta: response.meta,
        }
    }
}

/// `GET /api/projects/categories` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub data: Vec<String>,
}

/// `GET /api/projects/{slug}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub data: Project,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
