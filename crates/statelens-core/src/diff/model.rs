//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.

use crate::model::SanitizedValue;
use serde::{Deserialize, Serialize};

/// Sanitized state and props of one side of an aligned node pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeState {
    pub state: SanitizedValue,
    pub props: SanitizedValue,
}

/// Divergence record for one aligned node pair
///
/// Only produced when at least one of the two difference lists is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffEntry {
    /// Slash-delimited component path, ending in `/<component>`
    pub path: String,
    pub current: NodeState,
    pub other: NodeState,
    pub state_differences: Vec<String>,
    pub props_differences: Vec<String>,
}

impl DiffEntry {
    /// Component name at the end of the path
    pub fn component(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }
}

/// One item of differ output, in pre-order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Divergence {
    /// Components differ at an aligned position; the branch is not descended
    ComponentMismatch {
        path: String,
        current: String,
        other: String,
    },
    Entry(DiffEntry),
}

impl Divergence {
    pub fn path(&self) -> &str {
        match self {
            Divergence::ComponentMismatch { path, .. } => path,
            Divergence::Entry(entry) => &entry.path,
        }
    }

    pub fn as_entry(&self) -> Option<&DiffEntry> {
        match self {
            Divergence::Entry(entry) => Some(entry),
            Divergence::ComponentMismatch { .. } => None,
        }
    }

    /// Single-line description of the divergence
    pub fn note(&self) -> String {
        match self {
            Divergence::ComponentMismatch {
                path,
                current,
                other,
            } => format!("{}: {} !== {}", path, current, other),
            Divergence::Entry(entry) => format!(
                "{}: {} state, {} props difference(s)",
                entry.path,
                entry.state_differences.len(),
                entry.props_differences.len()
            ),
        }
    }
}

/// Digest identity of both compared snapshots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffIdentity {
    /// SHA-256 of the current snapshot's canonical JSON
    pub current_digest: String,
    /// SHA-256 of the other snapshot's canonical JSON
    pub other_digest: String,
}

/// High-level classification of a comparison
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiffClassification {
    /// Both snapshots have the same canonical form
    Identical,
    /// The snapshots differ, but only where nodes are not aligned (an extra
    /// child on one side)
    NoDivergence,
    /// At least one divergence was reported
    Changed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffCounts {
    pub current_nodes: usize,
    pub other_nodes: usize,
    pub component_mismatches: usize,
    pub entries: usize,
    pub state_differences: usize,
    pub props_differences: usize,
}

/// A comparison with its identity block, classification and counts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffReport {
    /// Schema version of this structure (always 1)
    pub diff_schema_version: u32,
    pub identity: DiffIdentity,
    pub classification: DiffClassification,
    pub counts: DiffCounts,
    pub divergences: Vec<Divergence>,
}

impl DiffReport {
    pub fn entries(&self) -> impl Iterator<Item = &DiffEntry> {
        self.divergences.iter().filter_map(Divergence::as_entry)
    }
}
