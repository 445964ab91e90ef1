//! Configuration loader with inheritance support.
//!
//! Loads configuration from multiple sources and merges them:
//! 1. Global config: `~/.folio/config.toml`
//! 2. Local config: `.folio/config.toml` (in the working directory)
//! 3. Explicit config file (`--config` / `FOLIO_CONFIG`), if given
//! 4. CLI overrides
//!
//! Later sources override earlier ones.

use crate::error::ConfigError;
use crate::{
    BackendConfig, CacheConfig, CacheWindow, CatalogConfig, ClientConfig, ConfigOverrides,
    FolioConfig, LoggingConfig, ServerConfig,
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Global and local configuration directory name.
const CONFIG_DIR: &str = ".folio";

/// Configuration loader with caching and inheritance support.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Global config directory (e.g., `~/.folio`)
    global_config_dir: Option<PathBuf>,

    /// Cached global config
    global_config: Option<FolioConfig>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    ///
    /// Automatically detects the global config directory (`~/.folio`).
    pub fn new() -> Self {
        let global_config_dir = dirs::home_dir().map(|h| h.join(CONFIG_DIR));

        Self {
            global_config_dir,
            global_config: None,
        }
    }

    /// Create a loader with a custom global config directory.
    ///
    /// Useful for testing.
    pub fn with_global_dir(global_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_config_dir: Some(global_dir.into()),
            global_config: None,
        }
    }

    /// Get the global config file path.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.global_config_dir
            .as_ref()
            .map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Get the local config file path for a directory.
    pub fn local_config_path(&self, root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE_NAME)
    }

    /// Load configuration for a directory with optional CLI overrides.
    ///
    /// Merges config in order: global → local → overrides.
    pub fn load(
        &mut self,
        root: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<FolioConfig, ConfigError> {
        self.load_with_file(root, None, overrides)
    }

    /// Like [`load`](Self::load), with an explicit config file layered
    /// between the local config and the CLI overrides.
    ///
    /// A missing explicit file is an error, unlike the global and local ones.
    pub fn load_with_file(
        &mut self,
        root: &Path,
        explicit: Option<&Path>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<FolioConfig, ConfigError> {
        let mut config = FolioConfig::default();

        if let Some(global_config) = self.load_global()? {
            config = merge_configs(config, global_config);
        }

        if let Some(local_config) = self.load_local(root)? {
            config = merge_configs(config, local_config);
        }

        if let Some(path) = explicit {
            debug!("Loading config from {:?}", path);
            config = merge_configs(config, load_config_file(path)?);
        }

        if let Some(ovr) = overrides {
            config.apply_overrides(ovr);
        }

        Ok(config)
    }

    /// Load only the global configuration.
    pub fn load_global(&mut self) -> Result<Option<FolioConfig>, ConfigError> {
        if let Some(ref config) = self.global_config {
            return Ok(Some(config.clone()));
        }

        let Some(global_path) = self.global_config_path() else {
            debug!("No home directory found, skipping global config");
            return Ok(None);
        };

        if !global_path.exists() {
            trace!("Global config not found at {:?}", global_path);
            return Ok(None);
        }

        debug!("Loading global config from {:?}", global_path);
        let config = load_config_file(&global_path)?;

        self.global_config = Some(config.clone());

        Ok(Some(config))
    }

    /// Load only the local configuration for a directory.
    pub fn load_local(&self, root: &Path) -> Result<Option<FolioConfig>, ConfigError> {
        let local_path = self.local_config_path(root);

        if !local_path.exists() {
            trace!("Local config not found at {:?}", local_path);
            return Ok(None);
        }

        debug!("Loading local config from {:?}", local_path);
        load_config_file(&local_path).map(Some)
    }

    /// Save configuration to the global config file.
    pub fn save_global(&self, config: &FolioConfig) -> Result<(), ConfigError> {
        let Some(ref global_dir) = self.global_config_dir else {
            return Err(ConfigError::NoHomeDir);
        };

        save_config_file(&global_dir.join(CONFIG_FILE_NAME), config)
    }

    /// Save configuration to the local config file for a directory.
    pub fn save_local(&self, root: &Path, config: &FolioConfig) -> Result<(), ConfigError> {
        save_config_file(&self.local_config_path(root), config)
    }
}

/// Load a configuration file from disk.
fn load_config_file(path: &Path) -> Result<FolioConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;

    toml::from_str(&content).map_err(|e| ConfigError::parse(path, e))
}

/// Save a configuration file to disk.
fn save_config_file(path: &Path, config: &FolioConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::write(parent, e))?;
        }
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write(path, e))
}

/// Merge two configurations, with `overlay` taking precedence.
///
/// Field-by-field: an overlay value equal to the default keeps the base value.
fn merge_configs(base: FolioConfig, overlay: FolioConfig) -> FolioConfig {
    FolioConfig {
        server: merge_server(base.server, overlay.server),
        catalog: merge_catalog(base.catalog, overlay.catalog),
        backend: merge_backend(base.backend, overlay.backend),
        client: merge_client(base.client, overlay.client),
        logging: merge_logging(base.logging, overlay.logging),
    }
}

fn merge_server(base: ServerConfig, overlay: ServerConfig) -> ServerConfig {
    let default = ServerConfig::default();
    ServerConfig {
        bind: if overlay.bind != default.bind {
            overlay.bind
        } else {
            base.bind
        },
        request_timeout_secs: overlay.request_timeout_secs.or(base.request_timeout_secs),
        cache: merge_cache(base.cache, overlay.cache),
    }
}

fn merge_cache(base: CacheConfig, overlay: CacheConfig) -> CacheConfig {
    let default = CacheConfig::default();
    let pick = |b: CacheWindow, o: CacheWindow, d: CacheWindow| if o != d { o } else { b };
    CacheConfig {
        list: pick(base.list, overlay.list, default.list),
        categories: pick(base.categories, overlay.categories, default.categories),
        project: pick(base.project, overlay.project, default.project),
    }
}

fn merge_catalog(base: CatalogConfig, overlay: CatalogConfig) -> CatalogConfig {
    CatalogConfig {
        path: overlay.path.or(base.path),
        strict_slugs: overlay.strict_slugs || base.strict_slugs,
    }
}

fn merge_backend(base: BackendConfig, overlay: BackendConfig) -> BackendConfig {
    BackendConfig {
        backend_type: if overlay.backend_type != crate::BackendType::Local {
            overlay.backend_type
        } else {
            base.backend_type
        },
        remote: overlay.remote.or(base.remote),
    }
}

fn merge_client(base: ClientConfig, overlay: ClientConfig) -> ClientConfig {
    ClientConfig {
        page_size: overlay.page_size.or(base.page_size),
    }
}

fn merge_logging(base: LoggingConfig, overlay: LoggingConfig) -> LoggingConfig {
    LoggingConfig {
        level: if overlay.level != "info" {
            overlay.level
        } else {
            base.level
        },
        format: if overlay.format != crate::LogFormat::Text {
            overlay.format
        } else {
            base.format
        },
        file: overlay.file.or(base.file),
    }
}
