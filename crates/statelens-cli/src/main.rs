//! Statelens CLI
//!
//! Command-line interface for inspecting and comparing component trees

use clap::{Parser, Subcommand, ValueEnum};
use statelens_core::logging_facility::{init, Profile};
use statelens_core::{Inspector, InspectorConfig};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "statelens")]
#[command(about = "Statelens - component state inspection and comparison", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit structured logs on stderr
    #[arg(long, global = true, value_enum)]
    log: Option<LogProfile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    Dev,
    Prod,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract a sanitized snapshot from a tree fixture
    Extract(commands::extract::ExtractArgs),
    /// Render the extracted snapshot of a tree fixture
    Tree(commands::tree::TreeArgs),
    /// Render a tree fixture as a live tree
    Live(commands::live::LiveArgs),
    /// Compare two trees and render the divergence
    Diff(commands::diff::DiffArgs),
}

fn inspector(config: Option<&PathBuf>) -> Result<Inspector, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => InspectorConfig::load(path)?,
        None => InspectorConfig::default(),
    };
    Ok(Inspector::new(config))
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.log {
        Some(LogProfile::Dev) => init(Profile::Development),
        Some(LogProfile::Prod) => init(Profile::Production),
        None => {}
    }

    let inspector = inspector(cli.config.as_ref())?;

    match cli.command {
        Commands::Extract(args) => commands::extract::execute(args, &inspector),
        Commands::Tree(args) => commands::tree::execute(args, &inspector),
        Commands::Live(args) => commands::live::execute(args, &inspector),
        Commands::Diff(args) => commands::diff::execute(args, &inspector),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
