//! List command - Filtered, paginated project listing

use anyhow::{Context, Result};
use clap::Args;
use folio_config::FolioConfig;
use folio_core::{PaginationMeta, ProjectsResponse, QueryRequest, QueryResult, DEFAULT_LIMIT};

use super::{create_backend, format_tags, OutputFormat};
use crate::GlobalOptions;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, short = 'p', default_value = "1")]
    page: u32,

    /// Page size (defaults to client.page_size, then 6)
    #[arg(long, short = 'n')]
    limit: Option<u32>,

    /// Case-insensitive text matched against name, description and tags
    #[arg(long, short = 's')]
    search: Option<String>,

    /// Exact category tag (case-insensitive)
    #[arg(long, short = 't')]
    category: Option<String>,

    /// Output format: text (default), json
    #[arg(long, short = 'o', value_enum, default_value = "text")]
    output: OutputFormat,
}

impl ListArgs {
    fn to_request(&self, config: &FolioConfig) -> QueryRequest {
        QueryRequest {
            page: self.page,
            limit: self
                .limit
                .or(config.client.page_size)
                .unwrap_or(DEFAULT_LIMIT),
            search: self.search.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
        }
    }
}

/// Execute the list command
pub async fn execute(args: ListArgs, global: GlobalOptions, config: FolioConfig) -> Result<()> {
    let backend = create_backend(&config)?;
    let request = args.to_request(&config);

    let result = backend
        .list_projects(&request)
        .await
        .context("Failed to list projects")?;

    match args.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&ProjectsResponse::from(result))
                .context("Failed to serialize results")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_page(&result, global.quiet),
    }

    Ok(())
}

fn print_page(result: &QueryResult, quiet: bool) {
    if result.data.is_empty() {
        if !quiet {
            eprintln!("No projects found");
        }
    } else {
        for project in &result.data {
            println!("{:<28} {}", project.name, format_tags(&project.category));
        }
    }

    if !quiet {
        println!("\n{}", page_summary(&result.meta));
    }
}

/// One-line pagination footer, e.g. `Page 1 of 2 (10 projects)`.
pub fn page_summary(meta: &PaginationMeta) -> String {
    let noun = if meta.total == 1 { "project" } else { "projects" };
    format!(
        "Page {} of {} ({} {})",
        meta.page,
        meta.total_pages.max(1),
        meta.total,
        noun
    )
}
