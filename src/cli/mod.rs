//! Command-line interface for depmerge
//!
//! Provides `normalize`, `explain` and `completions` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod completions;
mod explain;
mod normalize;
mod utils;

/// Merge file records from nested node_modules trees into one root package
#[derive(Parser)]
#[command(name = "depmerge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Relocate or drop records so dependencies land under the root package
    Normalize(normalize::NormalizeArgs),

    /// Show which rule applies to each path without reading any records
    Explain(explain::ExplainArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Normalize(args) => normalize::run(args),
        Commands::Explain(args) => explain::run(args),
        Commands::Completions(args) => completions::run(args),
    }
}
