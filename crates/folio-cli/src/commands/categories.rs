//! Categories command - List all category tags

use anyhow::{Context, Result};
use clap::Args;
use folio_config::FolioConfig;
use folio_core::CategoriesResponse;

use super::{create_backend, OutputFormat};
use crate::GlobalOptions;

/// Arguments for the categories command
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Output format: text (default), json
    #[arg(long, short = 'o', value_enum, default_value = "text")]
    output: OutputFormat,
}

/// Execute the categories command
pub async fn execute(args: CategoriesArgs, global: GlobalOptions, config: FolioConfig) -> Result<()> {
    let backend = create_backend(&config)?;
    let categories = backend
        .list_categories()
        .await
        .context("Failed to list categories")?;

    match args.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&CategoriesResponse { data: categories })?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if categories.is_empty() && !global.quiet {
                eprintln!("No categories found");
            }
            for category in categories {
                println!("{}", category);
            }
        }
    }

    Ok(())
}
