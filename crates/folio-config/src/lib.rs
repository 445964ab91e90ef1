//! Folio Configuration Management
//!
//! Provides configuration loading with support for:
//! - Global config: `~/.folio/config.toml`
//! - Local config: `.folio/config.toml` (in the working directory)
//! - CLI overrides via `ConfigOverrides`
//!
//! Configuration is merged in order: global → local → CLI overrides.

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Largest page size the service accepts.
const MAX_PAGE_SIZE: u32 = 100;

/// Root configuration for Folio.
///
/// Represents the fully merged configuration from all sources.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FolioConfig {
    /// HTTP service configuration
    pub server: ServerConfig,

    /// Catalog source configuration
    pub catalog: CatalogConfig,

    /// Backend selection for CLI queries
    pub backend: BackendConfig,

    /// Client query adapter configuration
    pub client: ClientConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP service configuration.
///
/// # Example TOML
///
/// ```toml
/// [server]
/// bind = "0.0.0.0:8080"
/// request_timeout_secs = 10
///
/// [server.cache.list]
/// s_maxage = 30
/// stale_while_revalidate = 120
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,

    /// Per-request timeout in seconds (None = no timeout)
    pub request_timeout_secs: Option<u64>,

    /// Cache-Control windows per endpoint
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            request_timeout_secs: None,
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse the bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|e| ConfigError::invalid_value("server.bind", format!("{}: {}", self.bind, e)))
    }
}

/// Shared-cache freshness window for one endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheWindow {
    /// Seconds a shared cache may serve the response as fresh
    pub s_maxage: u64,

    /// Further seconds a stale response may be served while revalidating
    pub stale_while_revalidate: u64,
}

impl CacheWindow {
    pub const fn new(s_maxage: u64, stale_while_revalidate: u64) -> Self {
        Self {
            s_maxage,
            stale_while_revalidate,
        }
    }

    /// Render as a `Cache-Control` header value.
    pub fn header_value(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate={}",
            self.s_maxage, self.stale_while_revalidate
        )
    }
}

/// Cache-Control windows for the three read endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// `GET /api/projects`
    pub list: CacheWindow,

    /// `GET /api/projects/categories`
    pub categories: CacheWindow,

    /// `GET /api/projects/{slug}`
    pub project: CacheWindow,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            list: CacheWindow::new(60, 300),
            categories: CacheWindow::new(300, 600),
            project: CacheWindow::new(3600, 86400),
        }
    }
}

/// Catalog source configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog file (JSON array or TOML `[[projects]]`); None = built-in sample
    pub path: Option<PathBuf>,

    /// Fail at load time when two project names share a slug
    pub strict_slugs: bool,
}

/// Backend configuration for CLI queries.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend type to use
    pub backend_type: BackendType,

    /// Remote server configuration (for HTTP backend)
    pub remote: Option<RemoteConfig>,
}

/// Backend type selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Query the catalog in-process
    #[default]
    Local,
    /// Query a running Folio server over HTTP
    Remote,
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

impl std::str::FromStr for BackendType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" | "http" => Ok(Self::Remote),
            _ => Err(ConfigError::unknown_variant(
                "backend type",
                s,
                "local, remote",
            )),
        }
    }
}

/// Remote Folio server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteConfig {
    /// Server base URL
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Client query adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Page size override (None = chosen by presentation mode)
    pub page_size: Option<u32>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: LogFormat,

    /// Log file path (optional)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON structured logging
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::unknown_variant("log format", s, "text, json")),
        }
    }
}

/// CLI overrides for configuration values.
///
/// Used to apply command-line arguments over file-based config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override server bind address
    pub bind: Option<String>,

    /// Override catalog file
    pub catalog_path: Option<PathBuf>,

    /// Override strict slug checking
    pub strict_slugs: Option<bool>,

    /// Query a remote server at this URL (switches backend to remote)
    pub server_url: Option<String>,

    /// Override log level
    pub log_level: Option<String>,
}

impl FolioConfig {
    /// Apply CLI overrides to this configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref bind) = overrides.bind {
            self.server.bind = bind.clone();
        }

        if let Some(ref path) = overrides.catalog_path {
            self.catalog.path = Some(path.clone());
        }

        if let Some(strict) = overrides.strict_slugs {
            self.catalog.strict_slugs = strict;
        }

        if let Some(ref url) = overrides.server_url {
            self.backend.backend_type = BackendType::Remote;
            let remote = self.backend.remote.get_or_insert_with(RemoteConfig::default);
            remote.url = url.clone();
        }

        if let Some(ref level) = overrides.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.bind_addr()?;

        if self.backend.backend_type == BackendType::Remote {
            match self.backend.remote {
                None => {
                    return Err(ConfigError::MissingSection {
                        key: "backend.backend_type",
                        section: "backend.remote",
                    })
                }
                Some(ref remote) if remote.url.is_empty() => {
                    return Err(ConfigError::invalid_value(
                        "backend.remote.url",
                        "must not be empty",
                    ))
                }
                Some(_) => {}
            }
        }

        if self.server.request_timeout_secs == Some(0) {
            return Err(ConfigError::invalid_value(
                "server.request_timeout_secs",
                "must be greater than 0",
            ));
        }

        if let Some(size) = self.client.page_size {
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(ConfigError::invalid_value(
                    "client.page_size",
                    format!("must be between 1 and {MAX_PAGE_SIZE}, got {size}"),
                ));
            }
        }

        Ok(())
    }
}
