//! CLI command implementations

pub mod diff;
pub mod extract;
pub mod live;
pub mod tree;

use statelens_core::render::{Line, WriterSink};
use statelens_core::{load_fixture, Inspector, Snapshot};
use std::path::Path;

/// Load a tree fixture and extract its snapshot; `None` when it has no root
pub(crate) fn extract_fixture(
    path: &Path,
    inspector: &Inspector,
) -> Result<Option<Snapshot>, Box<dyn std::error::Error>> {
    let root = load_fixture(path)?;
    Ok(inspector.extract(root.as_ref()))
}

/// Write lines as plain text to stdout
pub(crate) fn print_lines(
    inspector: &Inspector,
    lines: &[Line],
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut sink = WriterSink::new(stdout.lock());
    inspector.deliver(&mut sink, lines)?;
    Ok(())
}
