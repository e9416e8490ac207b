//! Snapshot tree differ.
//!
//! Aligns two [`Snapshot`](crate::model::Snapshot) trees by position and
//! reports where they diverge.
//!
//! ## Entry point
//!
//! ```
//! use statelens_core::diff::{diff_trees, render_human_summary, build_report};
//! use statelens_core::model::{SanitizedValue, Snapshot};
//!
//! let counter = |n| {
//!     let state = SanitizedValue::object([("count", SanitizedValue::Number(n))]);
//!     Snapshot::named("Counter", state, SanitizedValue::empty_object(), vec![])
//! };
//! let (a, b) = (counter(1.0), counter(2.0));
//!
//! assert_eq!(diff_trees(&a, &b).len(), 1);
//! let summary = render_human_summary(&build_report(&a, &b));
//! assert!(summary.contains("Changed"));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical output, in pre-order.
//! - **Reflexivity**: a tree diffed against itself yields nothing, `NaN` included.
//! - **Symmetry**: swapping the sides flags the same keys, with the
//!   missing-in labels swapped.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{build_report, compare_values, diff_trees};
pub use human_summary::render_human_summary;
pub use model::{
    DiffClassification, DiffCounts, DiffEntry, DiffIdentity, DiffReport, Divergence, NodeState,
};
