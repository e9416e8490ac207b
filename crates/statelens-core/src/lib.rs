//! Statelens Core - runtime component-tree inspection
//!
//! This crate provides the data structures and operations for inspecting a
//! live UI component tree, including:
//! - A shared-reference value model and the `LiveNode` boundary to the host tree
//! - An in-memory tree adapter and JSON fixture loader
//! - Cycle-guarded sanitization of component state and props
//! - Snapshot extraction with transparent wrapper nodes
//! - Positional tree diffing with per-key difference notes
//! - Connector-drawn text rendering of snapshots and live trees, and line sinks
//! - A cycle-safe JSON encoder for ad-hoc payloads

pub mod adapter;
pub mod config;
pub mod diff;
pub mod encode;
pub mod errors;
pub mod inspector;
pub mod logging_facility;
pub mod model;
pub mod render;
pub mod sanitize;
pub mod traversal;

pub use statelens_core_types as types;

// Re-export commonly used types
pub use adapter::{load_fixture, load_fixture_str, MemoryNode};
pub use config::{CycleMode, DiffLookup, InspectorConfig};
pub use diff::{build_report, diff_trees, DiffEntry, DiffReport, Divergence};
pub use encode::CircularSafeSerializer;
pub use errors::{ExError, ExErrorKind, LensError, Result};
pub use inspector::Inspector;
pub use model::{LiveNode, SanitizedValue, Snapshot, Value};
pub use render::{render_live, render_tree, Line, Sink, StyleHint};
pub use sanitize::Sanitizer;
pub use traversal::extract;
