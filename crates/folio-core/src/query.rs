//! Query engine: filtering and pagination over the catalog.
//!
//! Filters run in a fixed order (search, then category) and combine with
//! logical AND. Pagination is applied to the filtered sequence; a page past
//! the end is an empty result, not an error.

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::project::Project;

/// Default page number.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 6;

/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 100;

/// Filter and pagination parameters.
///
/// Empty `search`/`category` strings disable the corresponding filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    /// 1-based page number
    pub page: u32,

    /// Page size, 1..=100
    pub limit: u32,

    /// Case-insensitive substring matched against name, description and tags
    pub search: String,

    /// Case-insensitive exact tag match
    pub category: String,
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            category: String::new(),
        }
    }
}

impl QueryRequest {
    /// Request for a given page and size with no filters.
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Default::default()
        }
    }

    /// Set the search filter.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Check pagination bounds.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page < 1 || self.limit < 1 || self.limit > MAX_LIMIT {
            return Err(QueryError::invalid_pagination(self.page, self.limit));
        }
        Ok(())
    }

    /// Whether either filter is active.
    pub fn has_filters(&self) -> bool {
        !self.search.is_empty() || !self.category.is_empty()
    }
}

/// Partial request merged over an existing [`QueryRequest`].
///
/// Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryUpdate {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl QueryUpdate {
    /// Update that only changes the page.
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    /// Apply this update on top of `base`.
    pub fn apply(self, base: &QueryRequest) -> QueryRequest {
        QueryRequest {
            page: self.page.unwrap_or(base.page),
            limit: self.limit.unwrap_or(base.limit),
            search: self.search.unwrap_or_else(|| base.search.clone()),
            category: self.category.unwrap_or_else(|| base.category.clone()),
        }
    }
}

/// Pagination metadata derived from the filtered total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PaginationMeta {
    /// Compute metadata for `total` matching entries.
    ///
    /// `limit` must be non-zero.
    pub fn new(page: u32, limit: u32, total: usize) -> Self {
        let total_pages = total.div_ceil(limit as usize);
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page: (page as usize) < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// One page of filtered projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub data: Vec<Project>,
    pub meta: PaginationMeta,
}

/// Filter and paginate `projects`.
///
/// Returns [`QueryError::InvalidArgument`] when pagination is out of range;
/// an empty match set or a page past the end is a valid, empty result.
pub fn query(projects: &[Project], req: &QueryRequest) -> Result<QueryResult, QueryError> {
    req.validate()?;

    let filtered = filter(projects, &req.search, &req.category);
    let meta = PaginationMeta::new(req.page, req.limit, filtered.len());

    let start = (req.page as usize - 1).saturating_mul(req.limit as usize);
    let data = filtered
        .into_iter()
        .skip(start)
        .take(req.limit as usize)
        .cloned()
        .collect();

    Ok(QueryResult { data, meta })
}

/// Apply the search and category filters, preserving catalog order.
pub fn filter<'a>(projects: &'a [Project], search: &str, category: &str) -> Vec<&'a Project> {
    let search = search.to_lowercase();

    projects
        .iter()
        .filter(|p| search.is_empty() || p.contains_lowercase(&search))
        .filter(|p| category.is_empty() || p.has_category(category))
        .collect()
}
