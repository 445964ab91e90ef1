//! Client query adapter.
//!
//! Holds the active [`QueryRequest`] and the state presentation layers
//! render from. Every change is published on a `watch` channel.
//!
//! Each projects fetch is tagged with a sequence number. A response is
//! applied only if no newer response has been applied already, and
//! `loading` clears only once the most recently issued request lands.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use folio_core::{PaginationMeta, Project, QueryRequest, QueryUpdate, DEFAULT_LIMIT};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::traits::Backend;

/// How the project list is presented; decides the initial page size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PresentationMode {
    #[default]
    Grid,
    Carousel,
    Globe,
}

impl PresentationMode {
    /// Page size used when the adapter is created for this mode.
    pub fn page_size(self) -> u32 {
        match self {
            Self::Grid => DEFAULT_LIMIT,
            Self::Carousel | Self::Globe => 16,
        }
    }
}

impl std::fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grid => write!(f, "grid"),
            Self::Carousel => write!(f, "carousel"),
            Self::Globe => write!(f, "globe"),
        }
    }
}

impl std::str::FromStr for PresentationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "carousel" => Ok(Self::Carousel),
            "globe" => Ok(Self::Globe),
            _ => Err(format!(
                "Unknown presentation mode: '{}'. Valid values: grid, carousel, globe",
                s
            )),
        }
    }
}

/// Observable adapter state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterState {
    /// The request most recently issued
    pub request: QueryRequest,

    /// Projects from the last applied response
    pub projects: Vec<Project>,

    /// Pagination metadata from the last applied response
    pub meta: Option<PaginationMeta>,

    /// A projects fetch is outstanding
    pub loading: bool,

    /// Message from the last failed projects fetch
    pub error: Option<String>,

    /// Known category tags
    pub categories: Vec<String>,

    /// The category fetch is outstanding
    pub loading_categories: bool,

    /// Message from a failed category fetch
    pub categories_error: Option<String>,
}

/// What happened to a fetch once its response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response (success or failure) was written into state
    Applied,
    /// A newer response had already been applied; this one was dropped
    Stale,
}

/// Client query adapter over any [`Backend`].
pub struct ProjectsAdapter {
    backend: Arc<dyn Backend>,
    state: watch::Sender<AdapterState>,
    /// Sequence number of the most recently issued fetch
    issued: AtomicU64,
    /// Sequence number of the most recently applied fetch
    applied: AtomicU64,
}

impl ProjectsAdapter {
    /// Create an adapter whose page size follows `mode`.
    pub fn new(backend: Arc<dyn Backend>, mode: PresentationMode) -> Self {
        Self::with_page_size(backend, mode.page_size())
    }

    /// Create an adapter with an explicit page size.
    pub fn with_page_size(backend: Arc<dyn Backend>, limit: u32) -> Self {
        let initial = AdapterState {
            request: QueryRequest::page(1, limit),
            ..Default::default()
        };
        let (state, _) = watch::channel(initial);

        Self {
            backend,
            state,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AdapterState> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn snapshot(&self) -> AdapterState {
        self.state.borrow().clone()
    }

    /// Load categories and run the initial projects fetch concurrently.
    pub async fn mount(&self) -> FetchOutcome {
        let ((), outcome) = tokio::join!(
            self.load_categories(),
            self.fetch_projects(QueryUpdate::default())
        );
        outcome
    }

    /// Fetch the category list once.
    pub async fn load_categories(&self) {
        self.state.send_modify(|s| {
            s.loading_categories = true;
            s.categories_error = None;
        });

        let result = self.backend.list_categories().await;

        self.state.send_modify(|s| {
            s.loading_categories = false;
            match result {
                Ok(categories) => s.categories = categories,
                Err(e) => {
                    warn!("Failed to fetch categories: {}", e);
                    s.categories_error = Some(e.to_string());
                }
            }
        });
    }

    /// Merge `update` into the current request and fetch it.
    ///
    /// On failure `error` is set and `projects`/`meta` are cleared.
    pub async fn fetch_projects(&self, update: QueryUpdate) -> FetchOutcome {
        let mut request = QueryRequest::default();
        let mut seq = 0;
        self.state.send_modify(|s| {
            s.request = update.apply(&s.request);
            s.loading = true;
            s.error = None;
            seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            request = s.request.clone();
        });

        debug!(seq, page = request.page, limit = request.limit, "Fetching projects");
        let result = self.backend.list_projects(&request).await;

        let mut outcome = FetchOutcome::Applied;
        self.state.send_if_modified(|s| {
            if seq < self.applied.load(Ordering::SeqCst) {
                outcome = FetchOutcome::Stale;
                return false;
            }
            self.applied.store(seq, Ordering::SeqCst);

            match result {
                Ok(result) => {
                    s.projects = result.data;
                    s.meta = Some(result.meta);
                    s.error = None;
                }
                Err(e) => {
                    warn!("Failed to fetch projects: {}", e);
                    s.projects.clear();
                    s.meta = None;
                    s.error = Some(e.to_string());
                }
            }

            if seq == self.issued.load(Ordering::SeqCst) {
                s.loading = false;
            }
            true
        });

        if outcome == FetchOutcome::Stale {
            debug!(seq, "Discarded stale projects response");
        }
        outcome
    }

    /// Re-issue the current request unchanged.
    pub async fn refetch(&self) -> FetchOutcome {
        self.fetch_projects(QueryUpdate::default()).await
    }

    /// Set the search text and return to the first page.
    pub async fn search(&self, text: impl Into<String>) -> FetchOutcome {
        self.fetch_projects(QueryUpdate {
            search: Some(text.into()),
            page: Some(1),
            ..Default::default()
        })
        .await
    }

    /// Set the category filter (empty clears it) and return to the first page.
    pub async fn filter_category(&self, category: impl Into<String>) -> FetchOutcome {
        self.fetch_projects(QueryUpdate {
            category: Some(category.into()),
            page: Some(1),
            ..Default::default()
        })
        .await
    }

    /// Clear search and category and return to the first page.
    pub async fn clear_filters(&self) -> FetchOutcome {
        self.fetch_projects(QueryUpdate {
            search: Some(String::new()),
            category: Some(String::new()),
            page: Some(1),
            ..Default::default()
        })
        .await
    }

    /// Jump to a page.
    pub async fn go_to_page(&self, page: u32) -> FetchOutcome {
        self.fetch_projects(QueryUpdate::page(page)).await
    }

    /// Advance one page; `None` when already on the last page.
    pub async fn next_page(&self) -> Option<FetchOutcome> {
        let (page, meta) = {
            let s = self.state.borrow();
            (s.request.page, s.meta)
        };
        match meta {
            Some(meta) if meta.has_next_page => Some(self.go_to_page(page + 1).await),
            _ => None,
        }
    }

    /// Go back one page; `None` when already on the first page.
    pub async fn prev_page(&self) -> Option<FetchOutcome> {
        let (page, meta) = {
            let s = self.state.borrow();
            (s.request.page, s.meta)
        };
        match meta {
            Some(meta) if meta.has_prev_page => Some(self.go_to_page(page - 1).await),
            _ => None,
        }
    }
}
