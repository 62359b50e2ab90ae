//! Command-line interface for dx-catalog.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **tree**: Render the catalog forest as an indented, depth-annotated list
//! - **breadcrumb**: Print the root-to-entry trail for a code
//! - **parents**: List legal parent choices for an entry being edited
//! - **catalog**: List, show, export, or validate catalog entries
//! - **serve**: Start the query web service
//!
//! ## Usage
//!
//! ```text
//! # Render the embedded catalog as a tree
//! dx-catalog tree
//!
//! # Breadcrumb trail for a code (case-insensitive)
//! dx-catalog breadcrumb f32.1
//!
//! # Parent candidates while editing F32
//! dx-catalog parents F32
//!
//! # JSON output for scripting
//! dx-catalog tree --format json
//!
//! # Run against a custom catalog file
//! dx-catalog tree --catalog my_codes.json
//!
//! # Start the web service
//! dx-catalog serve --port 8080 --open
//! ```

use clap::{Parser, Subcommand};

pub mod breadcrumb;
pub mod catalog;
pub mod parents;
pub mod tree;

#[derive(Parser)]
#[command(name = "dx-catalog")]
#[command(version)]
#[command(about = "Build and query hierarchical diagnostic-code catalogs")]
#[command(
    long_about = "dx-catalog reconstructs a diagnostic-code forest from a flat entry list whose only structure is a parent-code foreign key.\n\nIt tolerates the data problems real catalogs have - missing, dangling, and cyclic parent references - and gives you:\n- A deterministic, depth-annotated display order\n- Root-to-entry breadcrumb trails\n- Cycle-safe parent candidates for edit forms\n- A data-quality report for catalog maintenance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the catalog forest as an indented tree
    Tree(tree::TreeArgs),

    /// Print the root-to-entry breadcrumb trail for a code
    Breadcrumb(breadcrumb::BreadcrumbArgs),

    /// List legal parent choices for an entry being edited
    Parents(parents::ParentsArgs),

    /// Manage catalog entries
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<std::path::PathBuf>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
