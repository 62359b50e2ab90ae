use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("dx_catalog=debug,info")
    } else {
        EnvFilter::new("dx_catalog=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Tree(args) => {
            cli::tree::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Breadcrumb(args) => {
            cli::breadcrumb::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Parents(args) => {
            cli::parents::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Catalog(args) => {
            cli::catalog::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(())
}
