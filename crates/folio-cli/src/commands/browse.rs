//! Browse command - Interactive catalog browser driven by the query adapter
//!
//! Reads one command per line from stdin and renders the adapter state after
//! each one. Works the same against the local catalog and a remote server.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use folio_backend::{AdapterState, FetchOutcome, PresentationMode, ProjectsAdapter};
use folio_config::FolioConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::{create_backend, format_tags, list::page_summary, print_info};
use crate::GlobalOptions;

/// Arguments for the browse command
#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Presentation mode: grid (6 per page), carousel or globe (16 per page)
    #[arg(long, short = 'm', default_value = "grid")]
    mode: PresentationMode,

    /// Page size (overrides the mode's default)
    #[arg(long, short = 'n')]
    limit: Option<u32>,
}

const HELP: &str = "\
Commands:
  search <text>     Filter by name, description or tag (empty clears)
  category <tag>    Filter by category tag (empty clears)
  clear             Clear search and category
  page <n>          Jump to page n
  next | prev       Move one page
  refetch           Reload the current page
  categories        Show all category tags
  help              Show this help
  quit              Exit";

/// One parsed line of browser input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Search(String),
    Category(String),
    Clear,
    Page(u32),
    Next,
    Prev,
    Refetch,
    Categories,
    Help,
    Quit,
}

impl BrowseCommand {
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "search" | "s" => Self::Search(rest.to_string()),
            "category" | "c" => Self::Category(rest.to_string()),
            "clear" => Self::Clear,
            "page" | "p" => {
                let page = rest
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid page number: '{}'", rest))?;
                Self::Page(page)
            }
            "next" | "n" => Self::Next,
            "prev" => Self::Prev,
            "refetch" | "r" => Self::Refetch,
            "categories" => Self::Categories,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("Unknown command: '{}' (try 'help')", other)),
        };

        Ok(Some(command))
    }
}

/// Execute the browse command
pub async fn execute(args: BrowseArgs, global: GlobalOptions, config: FolioConfig) -> Result<()> {
    let backend = create_backend(&config)?;
    let adapter = match args.limit.or(config.client.page_size) {
        Some(limit) => ProjectsAdapter::with_page_size(Arc::clone(&backend), limit),
        None => ProjectsAdapter::new(Arc::clone(&backend), args.mode),
    };

    print_info(
        &format!(
            "Browsing {} in {} mode. Type 'help' for commands.",
            backend.describe(),
            args.mode
        ),
        global.quiet,
    );

    adapter.mount().await;
    render(&adapter.snapshot());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let command = match BrowseCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };
        debug!(?command, "browse command");

        let outcome = match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            BrowseCommand::Categories => {
                adapter.load_categories().await;
                render_categories(&adapter.snapshot());
                continue;
            }
            BrowseCommand::Search(text) => adapter.search(text).await,
            BrowseCommand::Category(tag) => adapter.filter_category(tag).await,
            BrowseCommand::Clear => adapter.clear_filters().await,
            BrowseCommand::Page(page) => adapter.go_to_page(page).await,
            BrowseCommand::Refetch => adapter.refetch().await,
            BrowseCommand::Next => match adapter.next_page().await {
                Some(outcome) => outcome,
                None => {
                    eprintln!("Already on the last page");
                    continue;
                }
            },
            BrowseCommand::Prev => match adapter.prev_page().await {
                Some(outcome) => outcome,
                None => {
                    eprintln!("Already on the first page");
                    continue;
                }
            },
        };

        if outcome == FetchOutcome::Applied {
            render(&adapter.snapshot());
        }
    }

    Ok(())
}

fn render(state: &AdapterState) {
    if let Some(error) = &state.error {
        println!("Error: {}", error);
        return;
    }

    let mut filters = Vec::new();
    if !state.request.search.is_empty() {
        filters.push(format!("search=\"{}\"", state.request.search));
    }
    if !state.request.category.is_empty() {
        filters.push(format!("category={}", state.request.category));
    }
    if !filters.is_empty() {
        println!("Filters: {}", filters.join(" "));
    }

    if state.projects.is_empty() {
        println!("No projects found");
    }
    for project in &state.projects {
        println!(
            "  {:<28} {:<24} {}",
            project.name,
            project.slug(),
            format_tags(&project.category)
        );
    }

    if let Some(meta) = &state.meta {
        println!("{}", page_summary(meta));
    }
}

fn render_categories(state: &AdapterState) {
    if let Some(error) = &state.categories_error {
        println!("Error: {}", error);
        return;
    }
    println!("Categories: {}", state.categories.join(", "));
}
