use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::diagnosis::CatalogDiagnosis;
use crate::catalog::index::ChildrenIndex;
use crate::catalog::resolve::{breadcrumb, resolve_level};
use crate::catalog::store::CatalogStore;
use crate::cli::OutputFormat;
use crate::core::entry::CatalogEntry;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all entries in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Case-insensitive substring filter over code and name
        #[arg(long)]
        search: Option<String>,

        /// Only show active entries
        #[arg(long)]
        active_only: bool,
    },

    /// Show details of a specific entry
    Show {
        /// Entry code (case-insensitive)
        #[arg(required = true)]
        code: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Report data-quality anomalies (duplicates, dangling parents, cycles)
    Validate {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            catalog,
            search,
            active_only,
        } => run_list(catalog, search.as_deref(), active_only, format, verbose),
        CatalogCommands::Show { code, catalog } => run_show(&code, catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
        CatalogCommands::Validate { catalog } => run_validate(catalog, format, verbose),
    }
}

fn load_store(catalog_path: Option<PathBuf>) -> anyhow::Result<CatalogStore> {
    let store = if let Some(path) = catalog_path {
        CatalogStore::load_from_file(&path)?
    } else {
        CatalogStore::load_embedded()?
    };
    Ok(store)
}

fn run_list(
    catalog_path: Option<PathBuf>,
    search: Option<&str>,
    active_only: bool,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let store = load_store(catalog_path)?;

    if verbose {
        eprintln!("Loaded catalog with {} entries", store.len());
    }

    let filtered: Vec<&CatalogEntry> = match search {
        Some(query) => store.search(query),
        None => store.entries().iter().collect(),
    }
    .into_iter()
    .filter(|e| !active_only || e.active)
    .collect();

    match format {
        OutputFormat::Text => {
            // Calculate column widths dynamically
            let code_width = filtered
                .iter()
                .map(|e| e.code.len())
                .max()
                .unwrap_or(4)
                .max(4);
            let name_width = filtered
                .iter()
                .map(|e| e.name.len().min(45))
                .max()
                .unwrap_or(4)
                .max(4);
            let parent_width = filtered
                .iter()
                .map(|e| e.parent_code.as_deref().unwrap_or("").len())
                .max()
                .unwrap_or(6)
                .max(6);

            let total_width = code_width + name_width + parent_width + 5 + 6 + 4;

            println!("Catalog ({} entries)\n", filtered.len());
            println!(
                "{:<code_w$} {:<name_w$} {:<parent_w$} {:>5} {:>6}",
                "Code",
                "Name",
                "Parent",
                "Level",
                "Active",
                code_w = code_width,
                name_w = name_width,
                parent_w = parent_width
            );
            println!("{}", "-".repeat(total_width));

            for entry in &filtered {
                println!(
                    "{:<code_w$} {:<name_w$} {:<parent_w$} {:>5} {:>6}",
                    entry.code,
                    truncate(&entry.name, name_width),
                    entry.parent_code.as_deref().unwrap_or(""),
                    entry
                        .level
                        .map(|l| l.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    entry.active,
                    code_w = code_width,
                    name_w = name_width,
                    parent_w = parent_width
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        OutputFormat::Tsv => {
            println!("code\tname\tparent_code\tlevel\tactive");
            for entry in &filtered {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    entry.code,
                    entry.name,
                    entry.parent_code.as_deref().unwrap_or(""),
                    entry
                        .level
                        .map(|l| l.to_string())
                        .unwrap_or_default(),
                    entry.active
                );
            }
        }
    }

    Ok(())
}

fn run_show(code: &str, catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let store = load_store(catalog_path)?;

    let entry = store
        .get(code)
        .ok_or_else(|| anyhow::anyhow!("Entry '{code}' not found in catalog"))?;

    let resolved_level = resolve_level(entry, store.entries());
    let trail = breadcrumb(&entry.code, store.entries());
    let index = ChildrenIndex::build(store.entries());
    let children: Vec<&CatalogEntry> = entry
        .code_key()
        .map(|key| {
            index
                .children_of(&key)
                .iter()
                .map(|&i| &store.entries()[i])
                .collect()
        })
        .unwrap_or_default();

    match format {
        OutputFormat::Text => {
            println!("Entry: {}\n", entry.name);
            println!("Code:             {}", entry.code);
            println!(
                "Parent:           {}",
                entry.parent_code.as_deref().unwrap_or("-")
            );
            println!(
                "Level (stored):   {}",
                entry
                    .level
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            println!("Level (resolved): {resolved_level}");
            println!("Active:           {}", entry.active);

            if !entry.description.is_empty() {
                println!("\nDescription: {}", entry.description);
            }

            let rendered: Vec<String> = trail
                .iter()
                .map(|segment| segment.code.clone())
                .collect();
            println!("\nPath: {}", rendered.join(" > "));

            if !children.is_empty() {
                println!("\nChildren:");
                for child in &children {
                    println!("  {} {}", child.code, child.name);
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "entry": entry,
                "resolved_level": resolved_level,
                "breadcrumb": trail,
                "children": children,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("code\tname\tparent_code\tstored_level\tresolved_level\tactive");
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                entry.code,
                entry.name,
                entry.parent_code.as_deref().unwrap_or(""),
                entry
                    .level
                    .map(|l| l.to_string())
                    .unwrap_or_default(),
                resolved_level,
                entry.active
            );
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let store = load_store(catalog_path)?;

    let json = store.to_json()?;
    std::fs::write(&output, json)?;

    println!("Exported {} entries to {}", store.len(), output.display());

    Ok(())
}

fn run_validate(
    catalog_path: Option<PathBuf>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let store = load_store(catalog_path)?;

    if verbose {
        eprintln!("Loaded catalog with {} entries", store.len());
    }

    let diagnosis = CatalogDiagnosis::analyze(store.entries());

    match format {
        OutputFormat::Text => {
            println!("{diagnosis}");
        }
        OutputFormat::Json | OutputFormat::Tsv => {
            println!("{}", serde_json::to_string_pretty(&diagnosis)?);
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
