//! Dagher CLI - accessible widgets for static pages.
//!
//! Provides commands for:
//! - `render`: Mount every tab group of an HTML file and print the markup
//! - `replay`: Replay scripted interactions against a tab group

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, ReplayArgs};
use output::Output;

/// Dagher - accessible widgets for static pages.
#[derive(Parser)]
#[command(name = "dagher", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform tab groups and print the resulting markup.
    Render(RenderArgs),
    /// Replay interactions against the first tab group and print its state.
    Replay(ReplayArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Replay(args) => args.verbose,
    };

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Replay(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
