use std::path::PathBuf;

use clap::Args;

use crate::catalog::resolve::breadcrumb;
use crate::catalog::store::CatalogStore;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct BreadcrumbArgs {
    /// Entry code to resolve (case-insensitive)
    #[arg(required = true)]
    pub code: String,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

pub fn run(args: BreadcrumbArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = if let Some(path) = args.catalog {
        CatalogStore::load_from_file(&path)?
    } else {
        CatalogStore::load_embedded()?
    };

    if verbose {
        eprintln!("Loaded catalog with {} entries", store.len());
    }

    let trail = breadcrumb(&args.code, store.entries());
    if trail.is_empty() {
        anyhow::bail!("Entry '{}' not found in catalog", args.code);
    }

    match format {
        OutputFormat::Text => {
            let rendered: Vec<String> = trail
                .iter()
                .map(|segment| format!("{} {}", segment.code, segment.name))
                .collect();
            println!("{}", rendered.join(" > "));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&trail)?);
        }
        OutputFormat::Tsv => {
            println!("level\tcode\tname");
            for segment in &trail {
                println!("{}\t{}\t{}", segment.level, segment.code, segment.name);
            }
        }
    }

    Ok(())
}
