use std::path::PathBuf;

use clap::Args;

use crate::catalog::candidates::{parent_candidates, CandidateRow};
use crate::catalog::store::CatalogStore;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct ParentsArgs {
    /// Code of the entry being edited. Omit when creating a new entry.
    pub code: Option<String>,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

pub fn run(args: ParentsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = if let Some(path) = args.catalog {
        CatalogStore::load_from_file(&path)?
    } else {
        CatalogStore::load_embedded()?
    };

    if verbose {
        eprintln!("Loaded catalog with {} entries", store.len());
    }

    let editing = match &args.code {
        Some(code) => Some(
            store
                .get(code)
                .ok_or_else(|| anyhow::anyhow!("Entry '{code}' not found in catalog"))?,
        ),
        None => None,
    };

    let candidates = parent_candidates(store.entries(), editing);

    match format {
        OutputFormat::Text => {
            match editing {
                Some(entry) => println!("Parent candidates while editing {}\n", entry.code),
                None => println!("Parent candidates for a new entry\n"),
            }
            for candidate in &candidates {
                let indent = "  ".repeat(candidate.depth as usize);
                let marker = if candidate.selectable {
                    ""
                } else {
                    "  [not selectable]"
                };
                println!(
                    "{indent}{} {}{marker}",
                    candidate.entry.code, candidate.entry.name
                );
            }
        }
        OutputFormat::Json => {
            let rows: Vec<CandidateRow> = candidates.iter().map(CandidateRow::from).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Tsv => {
            println!("code\tname\tdepth\tselectable");
            for candidate in &candidates {
                println!(
                    "{}\t{}\t{}\t{}",
                    candidate.entry.code,
                    candidate.entry.name,
                    candidate.depth,
                    candidate.selectable
                );
            }
        }
    }

    Ok(())
}
