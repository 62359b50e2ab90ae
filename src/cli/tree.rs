use std::path::PathBuf;

use clap::Args;

use crate::catalog::hierarchy::{build_hierarchy, HierarchyRow};
use crate::catalog::store::CatalogStore;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct TreeArgs {
    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

pub fn run(args: TreeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = if let Some(path) = args.catalog {
        CatalogStore::load_from_file(&path)?
    } else {
        CatalogStore::load_embedded()?
    };

    if verbose {
        eprintln!("Loaded catalog with {} entries", store.len());
    }

    let nodes = build_hierarchy(store.entries());

    match format {
        OutputFormat::Text => {
            println!("Catalog hierarchy ({} entries)\n", nodes.len());
            for node in &nodes {
                let indent = "  ".repeat(node.depth as usize);
                let marker = if node.entry.active { "" } else { " (inactive)" };
                println!("{indent}{} {}{marker}", node.entry.code, node.entry.name);
            }
        }
        OutputFormat::Json => {
            let rows: Vec<HierarchyRow> = nodes.iter().map(HierarchyRow::from).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Tsv => {
            println!("code\tname\tdepth\tparent_code\tlevel\tactive");
            for node in &nodes {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    node.entry.code,
                    node.entry.name,
                    node.depth,
                    node.entry.parent_code.as_deref().unwrap_or(""),
                    node.entry
                        .level
                        .map(|l| l.to_string())
                        .unwrap_or_default(),
                    node.entry.active
                );
            }
        }
    }

    Ok(())
}
