//! Slug command - Name/slug conversion and collision report

use anyhow::Result;
use clap::Args;
use folio_backend::LocalBackend;
use folio_config::FolioConfig;
use folio_core::{find_slug_collisions, slug_to_name, to_slug};

use crate::GlobalOptions;

/// Arguments for the slug command
#[derive(Args, Debug)]
pub struct SlugArgs {
    /// Project name to convert (or slug, with --reverse)
    #[arg(required_unless_present = "collisions")]
    text: Option<String>,

    /// Turn a slug back into a search hint ("alpha-one" -> "alpha one")
    #[arg(long, short = 'r')]
    reverse: bool,

    /// Report names in the local catalog that share a slug
    #[arg(long, conflicts_with_all = ["text", "reverse"])]
    collisions: bool,
}

/// Execute the slug command
pub async fn execute(args: SlugArgs, global: GlobalOptions, config: FolioConfig) -> Result<()> {
    if args.collisions {
        let backend = LocalBackend::from_config(&config.catalog)?;
        let collisions = find_slug_collisions(backend.catalog().projects());

        if collisions.is_empty() {
            if !global.quiet {
                println!("No slug collisions");
            }
            return Ok(());
        }

        for collision in &collisions {
            println!("{}: {}", collision.slug, collision.names.join(", "));
        }
        anyhow::bail!("{} slug collision(s) found", collisions.len());
    }

    let text = args.text.unwrap_or_default();
    if args.reverse {
        println!("{}", slug_to_name(&text));
    } else {
        println!("{}", to_slug(&text));
    }

    Ok(())
}
