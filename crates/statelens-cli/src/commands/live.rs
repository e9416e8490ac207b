//! Live command
//!
//! Usage: statelens live <TREE> [--app <NAME> | --fragment <NAME>]

use clap::Args;
use statelens_core::{load_fixture, Inspector};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct LiveArgs {
    /// Tree fixture (JSON)
    pub tree: PathBuf,

    /// Start drawing at this component (must be on the first-child chain)
    #[arg(long)]
    pub app: Option<String>,

    /// List the fragment members under this component instead of the tree
    #[arg(long, conflicts_with = "app")]
    pub fragment: Option<String>,
}

/// Execute live command
pub fn execute(args: LiveArgs, inspector: &Inspector) -> Result<(), Box<dyn std::error::Error>> {
    let root = load_fixture(&args.tree)?;
    let lines = match args.fragment.as_deref() {
        Some(name) => inspector.fragment(root.as_ref(), name)?,
        None => inspector.render_live(root.as_ref(), args.app.as_deref())?,
    };
    super::print_lines(inspector, &lines)
}
