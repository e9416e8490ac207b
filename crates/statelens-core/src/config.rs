//! Inspector configuration.
//!
//! Every field has a default; a TOML document only needs to name what it
//! overrides:
//!
//! ```toml
//! left_label = "alice"
//! right_label = "bob"
//! cycle_mode = "marker"
//! diff_lookup = "positional"
//! redact_keys = ["password", "token"]
//! ```

use crate::errors::{ExError, ExErrorKind, LensError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the sanitizer produces when it meets a container a second time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleMode {
    /// Keep the original, unsanitized reference (legacy output)
    #[default]
    Retain,
    /// Substitute an explicit cyclic-reference marker
    Marker,
}

/// How the snapshot renderer picks the diff entry annotating a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffLookup {
    /// First entry whose path ends with `/<Name>`
    #[default]
    Suffix,
    /// The entry at the node's own position; the suffix match only for
    /// entries that are not positions of the rendered tree
    Positional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InspectorConfig {
    /// Label of the first (current) tree in diff annotations
    pub left_label: String,
    /// Label of the second (other) tree in diff annotations
    pub right_label: String,
    /// Label of the root line when rendering a live tree
    pub root_label: String,
    pub cycle_mode: CycleMode,
    pub diff_lookup: DiffLookup,
    /// Keys starting with any of these are private and dropped
    pub private_prefixes: Vec<String>,
    /// Bookkeeping keys dropped from state
    pub state_blocklist: Vec<String>,
    /// Bookkeeping keys dropped from props
    pub props_blocklist: Vec<String>,
    /// Keys whose values are kept but never displayed
    pub redact_keys: Vec<String>,
    /// Components whose host element is not attached to live-tree lines
    pub host_payload_exempt: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            left_label: "current".to_string(),
            right_label: "other".to_string(),
            root_label: "App".to_string(),
            cycle_mode: CycleMode::Retain,
            diff_lookup: DiffLookup::Suffix,
            private_prefixes: strings(&["_", "$$"]),
            state_blocklist: strings(&[
                "baseState",
                "baseQueue",
                "deps",
                "destroy",
                "create",
                "next",
                "_owner",
                "_store",
                "_source",
            ]),
            props_blocklist: strings(&["key", "type", "ref", "_owner", "_store", "_source"]),
            redact_keys: Vec::new(),
            host_payload_exempt: strings(&["Routes", "RenderedRoute"]),
        }
    }
}

impl InspectorConfig {
    /// Parse a TOML document, falling back to defaults for absent fields
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the document is not valid TOML or names an
    /// unknown field.
    pub fn from_toml_str(text: &str) -> Result<Self, ExError> {
        toml::from_str(text).map_err(|e| {
            ExError::from(LensError::InvalidConfig {
                reason: e.to_string(),
            })
            .with_op("load_config")
        })
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read, `InvalidConfig` when it cannot be
    /// parsed.
    pub fn load(path: &Path) -> Result<Self, ExError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_path(path.display().to_string())
                .with_message(e.to_string())
        })?;
        Self::from_toml_str(&text).map_err(|e| e.with_path(path.display().to_string()))
    }

    pub fn with_labels(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left_label = left.into();
        self.right_label = right.into();
        self
    }

    pub fn with_cycle_mode(mut self, mode: CycleMode) -> Self {
        self.cycle_mode = mode;
        self
    }

    pub fn with_diff_lookup(mut self, lookup: DiffLookup) -> Self {
        self.diff_lookup = lookup;
        self
    }
}
