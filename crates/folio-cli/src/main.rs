//! Folio CLI - Serve and browse a portfolio project catalog
//!
//! A command-line interface for running the Folio query service and for
//! querying a catalog, either in-process or through a running server.
//!
//! # Usage
//!
//! ```bash
//! # Serve the built-in sample catalog on 127.0.0.1:3000
//! folio serve
//!
//! # Serve a catalog file on another address
//! folio --catalog projects.toml serve --bind 0.0.0.0:8080
//!
//! # Query a running server
//! folio --server-url http://localhost:3000 list --search react
//!
//! # Look up one project
//! folio show personal-portfolio
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use folio_config::{ConfigOverrides, LogFormat, LoggingConfig};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

mod commands;

/// Folio - Portfolio project catalog service
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// Path to configuration file (layered over global and local config)
    #[arg(long, short = 'c', global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Query a running Folio server instead of a local catalog
    #[arg(long, global = true, env = "FOLIO_SERVER_URL")]
    server_url: Option<String>,

    /// Catalog file (JSON array or TOML with [[projects]])
    #[arg(long, global = true, env = "FOLIO_CATALOG")]
    catalog: Option<PathBuf>,

    /// Fail when two project names share a slug
    #[arg(long, global = true)]
    strict_slugs: bool,
}

impl GlobalOptions {
    /// Convert global options to config overrides
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            catalog_path: self.catalog.clone(),
            strict_slugs: self.strict_slugs.then_some(true),
            server_url: self.server_url.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP query service
    Serve(commands::serve::ServeArgs),

    /// List projects with search, category filter and pagination
    List(commands::list::ListArgs),

    /// List all category tags
    Categories(commands::categories::CategoriesArgs),

    /// Show a single project by slug
    Show(commands::show::ShowArgs),

    /// Convert a project name to its slug (or back)
    Slug(commands::slug::SlugArgs),

    /// Interactively page through projects
    Browse(commands::browse::BrowseArgs),

    /// View and manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--quiet`/`--verbose`, then the
/// configured level.
fn init_logging(global: &GlobalOptions, logging: &LoggingConfig) -> Result<()> {
    let level = if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {}", level))?;

    let writer = match logging.file {
        Some(ref path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(std::sync::Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    let ansi = logging.file.is_none();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);

    match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Config(_) => commands::read_config(&cli.global)?,
        _ => commands::load_config(&cli.global)?,
    };
    init_logging(&cli.global, &config.logging)?;

    // Execute the command
    match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, cli.global, config).await,
        Commands::List(args) => commands::list::execute(args, cli.global, config).await,
        Commands::Categories(args) => {
            commands::categories::execute(args, cli.global, config).await
        }
        Commands::Show(args) => commands::show::execute(args, cli.global, config).await,
        Commands::Slug(args) => commands::slug::execute(args, cli.global, config).await,
        Commands::Browse(args) => commands::browse::execute(args, cli.global, config).await,
        Commands::Config(cmd) => commands::config::execute(cmd, cli.global).await,
    }
}
