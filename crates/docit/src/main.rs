//! Docit CLI - menu tooling.
//!
//! Provides commands for:
//! - `render`: Render the configured menu definition
//! - `breadcrumb`: Print the breadcrumb trail to an href

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BreadcrumbArgs, RenderArgs};
use output::Output;

/// Docit - documentation menu tooling.
#[derive(Parser)]
#[command(name = "docit", version, about)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the menu through its view.
    Render(RenderArgs),
    /// Print the breadcrumb trail to the item linking to an href.
    Breadcrumb(BreadcrumbArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Breadcrumb(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
