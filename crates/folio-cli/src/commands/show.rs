//! Show command - Display one project by slug

use anyhow::{Context, Result};
use clap::Args;
use folio_config::FolioConfig;
use folio_core::{Project, ProjectResponse};

use super::{create_backend, format_tags, OutputFormat};
use crate::GlobalOptions;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project slug (e.g., "personal-portfolio")
    slug: String,

    /// Output format: text (default), json
    #[arg(long, short = 'o', value_enum, default_value = "text")]
    output: OutputFormat,
}

/// Execute the show command
pub async fn execute(args: ShowArgs, _global: GlobalOptions, config: FolioConfig) -> Result<()> {
    let backend = create_backend(&config)?;

    let project = backend
        .get_project(&args.slug)
        .await
        .context("Failed to fetch project")?
        .ok_or_else(|| anyhow::anyhow!("Project not found: {}", args.slug))?;

    match args.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&ProjectResponse { data: project })?;
            println!("{}", json);
        }
        OutputFormat::Text => print_project(&project),
    }

    Ok(())
}

fn print_project(project: &Project) {
    println!("{}", project.name);
    println!("{}\n", "=".repeat(project.name.chars().count()));
    if !project.description.is_empty() {
        println!("{}\n", project.description);
    }
    println!("Slug:       {}", project.slug());
    println!("Categories: {}", format_tags(&project.category));
    if !project.link.is_empty() {
        println!("Link:       {}", project.link);
    }
    if !project.github.is_empty() {
        println!("GitHub:     {}", project.github);
    }
    if !project.image.is_empty() {
        println!("Image:      {}", project.image);
    }
}
