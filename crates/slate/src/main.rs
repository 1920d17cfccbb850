//! Slate CLI - Markdown to static formats.
//!
//! Provides commands for:
//! - `page`: Build a single page from a markdown source
//! - `update`: Rebuild an existing output file from its markdown source

mod build;
mod commands;
mod error;
mod meta;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PageArgs, UpdateArgs};
use output::Output;

/// Slate - Markdown to HTML, Gemtext and Gophermap.
#[derive(Parser)]
#[command(name = "slate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a single page from a markdown source.
    Page(PageArgs),
    /// Update an existing output file from its markdown source.
    Update(UpdateArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let result = match cli.command {
        Commands::Page(args) => args.execute(&output),
        Commands::Update(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
