//! Request handlers for the project endpoints.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use folio_config::CacheWindow;
use folio_core::{
    CategoriesResponse, ProjectResponse, ProjectsResponse, QueryRequest, DEFAULT_LIMIT,
    DEFAULT_PAGE,
};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Project route group.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects))
        .route("/api/projects/", get(missing_slug))
        .route("/api/projects/categories", get(list_categories))
        .route("/api/projects/{slug}", get(get_project))
        .route("/health", get(health))
}

/// Raw listing query string. Page and limit stay textual so that an empty
/// value can mean "default" and anything else non-numeric can be rejected.
#[derive(Debug, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ListParams {
    /// Collect the known keys from decoded query pairs. A repeated key keeps
    /// its first value; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "search" => &mut params.search,
                "category" => &mut params.category,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Parse into a validated [`QueryRequest`].
    pub fn into_request(self) -> Result<QueryRequest, ApiError> {
        let request = QueryRequest {
            page: parse_number(self.page.as_deref(), DEFAULT_PAGE)?,
            limit: parse_number(self.limit.as_deref(), DEFAULT_LIMIT)?,
            search: self.search.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
        };

        request.validate().map_err(|e| {
            debug!("Rejected listing request: {}", e);
            ApiError::invalid_pagination()
        })?;
        Ok(request)
    }
}

fn parse_number(value: Option<&str>, default: u32) -> Result<u32, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            debug!("Rejected non-numeric pagination value '{}'", raw);
            ApiError::invalid_pagination()
        }),
    }
}

fn cache_control(window: CacheWindow) -> [(header::HeaderName, String); 1] {
    [(header::CACHE_CONTROL, window.header_value())]
}

/// `GET /api/projects`
pub async fn list_projects(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(pairs) = pairs.map_err(|e| {
        debug!("Malformed query string: {}", e);
        ApiError::invalid_pagination()
    })?;
    let request = ListParams::from_pairs(pairs).into_request()?;

    let result = state.catalog.query(&request)?;
    debug!(
        page = request.page,
        limit = request.limit,
        total = result.meta.total,
        "Listed projects"
    );

    Ok((
        cache_control(state.cache.list),
        Json(ProjectsResponse::from(result)),
    ))
}

/// `GET /api/projects/categories`
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    (
        cache_control(state.cache.categories),
        Json(CategoriesResponse {
            data: state.categories.as_ref().clone(),
        }),
    )
}

/// `GET /api/projects/{slug}`
pub async fn get_project(
    State(state): State<AppState>,
    slug: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(slug) = slug.map_err(|e| {
        debug!("Rejected project path: {}", e);
        ApiError::invalid_slug()
    })?;
    if slug.trim().is_empty() {
        return Err(ApiError::slug_required());
    }

    let project = state
        .catalog
        .find_by_slug(&slug)
        .cloned()
        .ok_or_else(ApiError::project_not_found)?;

    Ok((
        cache_control(state.cache.project),
        Json(ProjectResponse { data: project }),
    ))
}

/// `GET /api/projects/` with no slug segment.
pub async fn missing_slug() -> ApiError {
    ApiError::slug_required()
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}
