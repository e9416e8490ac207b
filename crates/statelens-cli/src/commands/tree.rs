//! Tree command
//!
//! Usage: statelens tree <TREE>

use clap::Args;
use statelens_core::Inspector;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Tree fixture (JSON)
    pub tree: PathBuf,
}

/// Execute tree command
pub fn execute(args: TreeArgs, inspector: &Inspector) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = super::extract_fixture(&args.tree, inspector)?;
    let lines = inspector.render(snapshot.as_ref(), &[]);
    super::print_lines(inspector, &lines)
}
