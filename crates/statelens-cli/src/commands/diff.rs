//! Diff command
//!
//! Usage: statelens diff <CURRENT> <OTHER> [--snapshots] [--left <L>] [--right <R>]
//!        [--format text|json|summary]

use clap::{Args, ValueEnum};
use statelens_core::diff::render_human_summary;
use statelens_core::render::{not_found_notice, JsonLinesSink};
use statelens_core::{Inspector, InspectorConfig, Snapshot};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Current tree
    pub current: PathBuf,

    /// Tree to compare against
    pub other: PathBuf,

    /// Inputs are saved snapshots instead of tree fixtures
    #[arg(long)]
    pub snapshots: bool,

    /// Label of the current side (overrides config)
    #[arg(long)]
    pub left: Option<String>,

    /// Label of the other side (overrides config)
    #[arg(long)]
    pub right: Option<String>,

    #[arg(long, value_enum, default_value_t = DiffFormat::Text)]
    pub format: DiffFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffFormat {
    /// Annotated tree
    Text,
    /// Annotated tree as JSON lines, with payloads
    Json,
    /// Markdown summary of the comparison
    Summary,
}

/// Execute diff command
pub fn execute(args: DiffArgs, inspector: &Inspector) -> Result<(), Box<dyn std::error::Error>> {
    let inspector = relabel(inspector, args.left.as_deref(), args.right.as_deref());

    let current = load_side(&args.current, args.snapshots, &inspector)?;
    let other = load_side(&args.other, args.snapshots, &inspector)?;

    let (Some(current), Some(other)) = (current, other) else {
        return super::print_lines(&inspector, &[not_found_notice()]);
    };

    match args.format {
        DiffFormat::Text => {
            let divergences = inspector.compare(&current, &other);
            super::print_lines(&inspector, &inspector.render(Some(&current), &divergences))
        }
        DiffFormat::Json => {
            let divergences = inspector.compare(&current, &other);
            let lines = inspector.render(Some(&current), &divergences);
            let stdout = std::io::stdout();
            let mut sink = JsonLinesSink::new(stdout.lock());
            inspector.deliver(&mut sink, &lines)?;
            Ok(())
        }
        DiffFormat::Summary => {
            let report = inspector.report(&current, &other);
            print!("{}", render_human_summary(&report));
            Ok(())
        }
    }
}

fn relabel(inspector: &Inspector, left: Option<&str>, right: Option<&str>) -> Inspector {
    if left.is_none() && right.is_none() {
        return inspector.clone();
    }
    let config: &InspectorConfig = inspector.config();
    let left = left.unwrap_or(&config.left_label).to_string();
    let right = right.unwrap_or(&config.right_label).to_string();
    Inspector::new(config.clone().with_labels(left, right))
}

fn load_side(
    path: &Path,
    saved: bool,
    inspector: &Inspector,
) -> Result<Option<Snapshot>, Box<dyn std::error::Error>> {
    if saved {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let snapshot = Snapshot::from_json_str(&text)
            .map_err(|e| e.with_path(path.display().to_string()))?;
        Ok(Some(snapshot))
    } else {
        super::extract_fixture(path, inspector)
    }
}
