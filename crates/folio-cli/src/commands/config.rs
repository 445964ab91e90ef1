//! Config command - View and manage configuration
//!
//! Provides commands for viewing and modifying Folio configuration:
//! - List all configuration with sources
//! - Get specific configuration values
//! - Set configuration values (local or global)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use folio_config::{ConfigLoader, FolioConfig, RemoteConfig};
use serde::Serialize;

use super::config_root;
use crate::GlobalOptions;

/// Config management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// List all configuration values with their sources
    List(ListArgs),

    /// Get a specific configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Show configuration file paths
    Path(PathArgs),
}

/// Arguments for the list command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Show only effective values (hide sources)
    #[arg(long)]
    effective: bool,
}

/// Arguments for the get command
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// Configuration key (e.g., "server.bind")
    key: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the set command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., "server.bind")
    key: String,

    /// Value to set ("none" clears optional values)
    value: String,

    /// Set in global config (~/.folio/config.toml) instead of local
    #[arg(long)]
    global: bool,
}

/// Arguments for the path command
#[derive(clap::Args, Debug)]
pub struct PathArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Configuration value with source information
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue {
    /// Configuration key
    pub key: String,
    /// Current value
    pub value: serde_json::Value,
    /// Source of this value (default, global, local)
    pub source: String,
}

/// Configuration paths
#[derive(Debug, Clone, Serialize)]
pub struct ConfigPaths {
    /// Global config file path
    pub global: Option<PathBuf>,
    /// Local config file path
    pub local: PathBuf,
    /// Whether global config exists
    pub global_exists: bool,
    /// Whether local config exists
    pub local_exists: bool,
}

/// Execute the config command
pub async fn execute(cmd: ConfigCommand, global: GlobalOptions) -> Result<()> {
    match cmd {
        ConfigCommand::List(args) => execute_list(args, global).await,
        ConfigCommand::Get(args) => execute_get(args, global).await,
        ConfigCommand::Set(args) => execute_set(args).await,
        ConfigCommand::Path(args) => execute_path(args).await,
    }
}

async fn execute_list(args: ListArgs, global: GlobalOptions) -> Result<()> {
    let root = config_root()?;
    let mut loader = ConfigLoader::new();

    let default_config = FolioConfig::default();
    let global_config = loader.load_global()?.unwrap_or_default();
    let local_config = loader.load_local(&root)?.unwrap_or_default();

    if args.json {
        if args.effective {
            let effective = loader.load_with_file(
                &root,
                global.config.as_deref(),
                Some(&global.to_config_overrides()),
            )?;
            println!("{}", serde_json::to_string_pretty(&effective)?);
        } else {
            let values = collect_config_values(&default_config, &global_config, &local_config)?;
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
    } else {
        let values = collect_config_values(&default_config, &global_config, &local_config)?;
        print_config_list(&values, &loader, &root);
    }

    Ok(())
}

async fn execute_get(args: GetArgs, global: GlobalOptions) -> Result<()> {
    let root = config_root()?;
    let mut loader = ConfigLoader::new();
    let config = loader.load_with_file(
        &root,
        global.config.as_deref(),
        Some(&global.to_config_overrides()),
    )?;

    let value = get_config_value(&config, &args.key)
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", args.key))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match value {
            serde_json::Value::String(s) => println!("{}", s),
            serde_json::Value::Bool(b) => println!("{}", b),
            serde_json::Value::Number(n) => println!("{}", n),
            serde_json::Value::Null => println!("null"),
            other => println!("{}", serde_json::to_string_pretty(&other)?),
        }
    }

    Ok(())
}

async fn execute_set(args: SetArgs) -> Result<()> {
    let root = config_root()?;
    let mut loader = ConfigLoader::new();

    let mut config = if args.global {
        loader.load_global()?.unwrap_or_default()
    } else {
        loader.load_local(&root)?.unwrap_or_default()
    };

    set_config_value(&mut config, &args.key, &args.value)
        .with_context(|| format!("Failed to set configuration key: {}", args.key))?;
    config.validate().context("Resulting configuration is invalid")?;

    if args.global {
        loader.save_global(&config)?;
        println!("Set {} = {} in global config", args.key, args.value);
    } else {
        loader.save_local(&root, &config)?;
        println!("Set {} = {} in local config", args.key, args.value);
    }

    Ok(())
}

async fn execute_path(args: PathArgs) -> Result<()> {
    let root = config_root()?;
    let loader = ConfigLoader::new();

    let global_path = loader.global_config_path();
    let local_path = loader.local_config_path(&root);

    let paths = ConfigPaths {
        global_exists: global_path.as_ref().is_some_and(|p| p.exists()),
        local_exists: local_path.exists(),
        global: global_path,
        local: local_path,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
    } else {
        println!("Configuration Paths");
        println!("===================\n");

        match &paths.global {
            Some(gp) => println!("Global: {} ({})", gp.display(), exists_label(paths.global_exists)),
            None => println!("Global: not available (no home directory)"),
        }
        println!(
            "Local:  {} ({})",
            paths.local.display(),
            exists_label(paths.local_exists)
        );
    }

    Ok(())
}

fn exists_label(exists: bool) -> &'static str {
    if exists {
        "exists"
    } else {
        "not found"
    }
}

/// Get a configuration value by key path
fn get_config_value(config: &FolioConfig, key: &str) -> Option<serde_json::Value> {
    let json = serde_json::to_value(config).ok()?;

    let mut current = &json;
    for part in key.split('.') {
        current = current.get(part)?;
    }

    Some(current.clone())
}

fn optional<T: std::str::FromStr>(value: &str) -> Result<Option<T>, T::Err> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

/// Set a configuration value by key path
fn set_config_value(config: &mut FolioConfig, key: &str, value: &str) -> Result<()> {
    match key {
        // Server
        "server.bind" => config.server.bind = value.to_string(),
        "server.request_timeout_secs" => config.server.request_timeout_secs = optional(value)?,
        "server.cache.list.s_maxage" => config.server.cache.list.s_maxage = value.parse()?,
        "server.cache.list.stale_while_revalidate" => {
            config.server.cache.list.stale_while_revalidate = value.parse()?
        }
        "server.cache.categories.s_maxage" => {
            config.server.cache.categories.s_maxage = value.parse()?
        }
        "server.cache.categories.stale_while_revalidate" => {
            config.server.cache.categories.stale_while_revalidate = value.parse()?
        }
        "server.cache.project.s_maxage" => config.server.cache.project.s_maxage = value.parse()?,
        "server.cache.project.stale_while_revalidate" => {
            config.server.cache.project.stale_while_revalidate = value.parse()?
        }

        // Catalog
        "catalog.path" => config.catalog.path = optional::<PathBuf>(value)?,
        "catalog.strict_slugs" => config.catalog.strict_slugs = value.parse()?,

        // Backend
        "backend.backend_type" => config.backend.backend_type = value.parse()?,
        "backend.remote.url" => {
            config
                .backend
                .remote
                .get_or_insert_with(RemoteConfig::default)
                .url = value.to_string()
        }
        "backend.remote.timeout_secs" => {
            config
                .backend
                .remote
                .get_or_insert_with(RemoteConfig::default)
                .timeout_secs = value.parse()?
        }

        // Client
        "client.page_size" => config.client.page_size = optional(value)?,

        // Logging
        "logging.level" => config.logging.level = value.to_string(),
        "logging.format" => config.logging.format = value.parse()?,
        "logging.file" => config.logging.file = optional::<PathBuf>(value)?,

        _ => anyhow::bail!("Unknown or read-only configuration key: {}", key),
    }

    Ok(())
}

/// Collect configuration values with source information
fn collect_config_values(
    default: &FolioConfig,
    global: &FolioConfig,
    local: &FolioConfig,
) -> Result<Vec<ConfigValue>> {
    let default_json = serde_json::to_value(default)?;
    let global_json = serde_json::to_value(global)?;
    let local_json = serde_json::to_value(local)?;

    let mut values = Vec::new();
    flatten_config("", &local_json, &global_json, &default_json, &mut values);
    Ok(values)
}

/// Recursively flatten config into key-value pairs with sources
fn flatten_config(
    prefix: &str,
    local: &serde_json::Value,
    global: &serde_json::Value,
    default: &serde_json::Value,
    values: &mut Vec<ConfigValue>,
) {
    match local {
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };

                let global_val = global.get(key).unwrap_or(&serde_json::Value::Null);
                let default_val = default.get(key).unwrap_or(&serde_json::Value::Null);

                flatten_config(&new_prefix, value, global_val, default_val, values);
            }
        }
        _ => {
            // Local wins when it differs from both defaults and global
            let (value, source) = if local != default && local != global {
                (local, "local")
            } else if global != default {
                (global, "global")
            } else {
                (default, "default")
            };

            values.push(ConfigValue {
                key: prefix.to_string(),
                value: value.clone(),
                source: source.to_string(),
            });
        }
    }
}

/// Print configuration in a human-readable format
fn print_config_list(values: &[ConfigValue], loader: &ConfigLoader, root: &Path) {
    println!("Folio Configuration");
    println!("===================\n");

    if let Some(gp) = loader.global_config_path() {
        let status = if gp.exists() { "" } else { " (not found)" };
        println!("Global config: {}{}", gp.display(), status);
    }
    let lp = loader.local_config_path(root);
    let status = if lp.exists() { "" } else { " (not found)" };
    println!("Local config:  {}{}", lp.display(), status);

    let split = |value: &ConfigValue| -> (String, String) {
        match value.key.rsplit_once('.') {
            Some((head, name)) => (head.to_string(), name.to_string()),
            None => (String::new(), value.key.clone()),
        }
    };
    let mut sorted: Vec<&ConfigValue> = values.iter().collect();
    sorted.sort_by_key(|value| split(value).0);

    let mut section = String::new();
    for value in sorted {
        let (head, name) = split(value);
        if head != section {
            section = head;
            println!("\n[{}]", section);
        }

        let source = match value.source.as_str() {
            "default" => String::new(),
            other => format!(" ({})", other),
        };
        println!("  {} = {}{}", name, value.value, source);
    }
}
