//! Remote backend for a running Folio server.
//!
//! # Endpoints
//!
//! - GET `{base_url}/api/projects?page=&limit=[&search=][&category=]`
//! - GET `{base_url}/api/projects/categories`
//! - GET `{base_url}/api/projects/{slug}`
//!
//! Every success body is `{"data": ...}` (listings add `"meta"`); every
//! error body is `{"error": "..."}`.

use std::time::Duration;

use async_trait::async_trait;
use folio_config::RemoteConfig;
use folio_core::{
    CategoriesResponse, ErrorResponse, Project, ProjectResponse, ProjectsResponse, QueryError,
    QueryRequest, QueryResult,
};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::BackendError;
use crate::traits::Backend;

/// Default timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Remote backend for connecting to a Folio server over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    /// HTTP client
    client: Client,

    /// Server base URL
    base_url: Url,

    /// Request timeout in seconds
    timeout_secs: u64,
}

impl RemoteBackend {
    /// Create a new remote backend with the default timeout.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let backend = RemoteBackend::new("http://localhost:3000")?;
    /// ```
    pub fn new(server_url: &str) -> Result<Self, BackendError> {
        Self::with_timeout(server_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a new remote backend with an explicit request timeout.
    pub fn with_timeout(server_url: &str, timeout_secs: u64) -> Result<Self, BackendError> {
        let base_url = Url::parse(server_url)
            .map_err(|e| BackendError::invalid_url(format!("{server_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::invalid_url(server_url));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BackendError::connection(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout_secs,
        })
    }

    /// Create a remote backend from the `[backend.remote]` config section.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, BackendError> {
        Self::with_timeout(&config.url, config.timeout_secs)
    }

    /// Get the server URL.
    pub fn server_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Build an endpoint URL by appending percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::invalid_url(self.base_url.as_str()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Response, BackendError> {
        debug!(%url, "GET");
        self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::connection("Request timed out")
            } else {
                BackendError::connection(format!("Request failed: {}", e))
            }
        })
    }
}

/// Turn a non-success response into an error, preferring the body's `error` message.
async fn status_error(response: Response) -> BackendError {
    let status = response.status().as_u16();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP error! status: {}", status),
    };
    BackendError::remote_server(status, message)
}

/// Decode a success body, rejecting anything without the expected envelope.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| BackendError::connection(format!("Failed to read response: {}", e)))?;
    serde_json::from_slice(&bytes).map_err(|e| BackendError::invalid_response(e.to_string()))
}

#[async_trait]
impl Backend for RemoteBackend {
    async fn list_projects(&self, request: &QueryRequest) -> Result<QueryResult, BackendError> {
        let mut url = self.endpoint(&["api", "projects"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &request.page.to_string());
            pairs.append_pair("limit", &request.limit.to_string());
            if !request.search.is_empty() {
                pairs.append_pair("search", &request.search);
            }
            if !request.category.is_empty() {
                pairs.append_pair("category", &request.category);
            }
        }

        let response = self.get(url).await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: ProjectsResponse = decode(response).await?;
        Ok(body.into())
    }

    async fn list_categories(&self) -> Result<Vec<String>, BackendError> {
        let url = self.endpoint(&["api", "projects", "categories"])?;

        let response = self.get(url).await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: CategoriesResponse = decode(response).await?;
        Ok(body.data)
    }

    async fn get_project(&self, slug: &str) -> Result<Option<Project>, BackendError> {
        if slug.trim().is_empty() {
            return Err(QueryError::invalid_argument("Project slug is required").into());
        }

        let url = self.endpoint(&["api", "projects", slug])?;

        let response = self.get(url).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body: ProjectResponse = decode(response).await?;
                Ok(Some(body.data))
            }
            _ => Err(status_error(response).await),
        }
    }

    async fn health_check(&self) -> Result<bool, BackendError> {
        match self.list_projects(&QueryRequest::page(1, 1)).await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!("Health check against {} failed: {}", self.base_url, e);
                Ok(false)
            }
        }
    }

    fn describe(&self) -> String {
        format!("remote server {}", self.base_url)
    }
}
