//! Extract command
//!
//! Usage: statelens extract <TREE> [--output <FILE>]

use clap::Args;
use statelens_core::render::not_found_notice;
use statelens_core::Inspector;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Tree fixture (JSON)
    pub tree: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute extract command
pub fn execute(args: ExtractArgs, inspector: &Inspector) -> Result<(), Box<dyn std::error::Error>> {
    let Some(snapshot) = super::extract_fixture(&args.tree, inspector)? else {
        return super::print_lines(inspector, &[not_found_notice()]);
    };

    let json = snapshot.to_json_pretty()?;

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, format!("{}\n", json))?;
        println!("✓ Snapshot written to {}", output_path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}
