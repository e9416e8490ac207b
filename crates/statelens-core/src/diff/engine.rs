//! Diff computation.
//!
//! [`diff_trees`] walks both trees in lockstep. Nodes are aligned purely by
//! path and child index. At each pair:
//!
//! 1. differing components produce a [`Divergence::ComponentMismatch`] and stop
//!    the descent;
//! 2. otherwise state and props are compared by [`compare_values`], and a
//!    [`DiffEntry`] is produced when either list is non-empty;
//! 3. children are visited index-wise up to the longer list, skipping indices
//!    present on one side only.

use crate::diff::model::{
    DiffClassification, DiffCounts, DiffEntry, DiffIdentity, DiffReport, Divergence, NodeState,
};
use crate::model::{SanitizedValue, Snapshot};
use std::collections::HashMap;

/// Positionally diff `current` against `other`
pub fn diff_trees(current: &Snapshot, other: &Snapshot) -> Vec<Divergence> {
    let mut divergences = Vec::new();
    compare_nodes(current, other, "", &mut divergences);
    divergences
}

fn compare_nodes(a: &Snapshot, b: &Snapshot, path: &str, out: &mut Vec<Divergence>) {
    if a.component() != b.component() {
        out.push(Divergence::ComponentMismatch {
            path: path.to_string(),
            current: a.display_name().to_string(),
            other: b.display_name().to_string(),
        });
        return;
    }

    let state_differences = compare_values(a.state(), b.state(), &format!("{}.state", path));
    let props_differences = compare_values(a.props(), b.props(), &format!("{}.props", path));

    if !state_differences.is_empty() || !props_differences.is_empty() {
        out.push(Divergence::Entry(DiffEntry {
            path: format!("{}/{}", path, a.display_name()),
            current: NodeState {
                state: a.state().clone(),
                props: a.props().clone(),
            },
            other: NodeState {
                state: b.state().clone(),
                props: b.props().clone(),
            },
            state_differences,
            props_differences,
        }));
    }

    for (i, (child_a, child_b)) in a.children().iter().zip(b.children()).enumerate() {
        let child_path = format!("{}/{}.children[{}]", path, a.display_name(), i);
        compare_nodes(child_a, child_b, &child_path, out);
    }
}

/// Structurally compare two sanitized values, producing one note per difference
///
/// Two composites are reconciled key by key (A's keys, then B's extras); any
/// other pair is compared by strict equality. A retained original is compared
/// through its structural form. Object keys come in `BTreeMap` order and
/// array indices ascend numerically, so index `2` precedes index `10`.
pub fn compare_values(a: &SanitizedValue, b: &SanitizedValue, path: &str) -> Vec<String> {
    let mut notes = Vec::new();
    compare_into(a, b, path, &mut notes);
    notes
}

fn compare_into(a: &SanitizedValue, b: &SanitizedValue, path: &str, notes: &mut Vec<String>) {
    let (a, b) = (a.resolved(), b.resolved());
    let (a, b) = (a.as_ref(), b.as_ref());
    if !(a.is_composite() && b.is_composite()) {
        if !a.same_as(b) {
            notes.push(format!("{}: {} !== {}", path, a.display_text(), b.display_text()));
        }
        return;
    }

    let a_entries = a.entries();
    let b_entries: HashMap<String, &SanitizedValue> = b.entries().into_iter().collect();

    for (key, a_value) in &a_entries {
        let key_path = format!("{}.{}", path, key);
        match b_entries.get(key) {
            Some(b_value) => compare_into(a_value, b_value, &key_path, notes),
            None => notes.push(format!("{}: key missing in B", key_path)),
        }
    }

    let a_keys: HashMap<&str, ()> = a_entries.iter().map(|(k, _)| (k.as_str(), ())).collect();
    for (key, _) in b.entries() {
        if !a_keys.contains_key(key.as_str()) {
            notes.push(format!("{}.{}: key missing in A", path, key));
        }
    }
}

/// Diff two snapshots and wrap the result with identity, classification and counts
pub fn build_report(current: &Snapshot, other: &Snapshot) -> DiffReport {
    let divergences = diff_trees(current, other);

    let identity = DiffIdentity {
        current_digest: current.digest(),
        other_digest: other.digest(),
    };

    let mut counts = DiffCounts {
        current_nodes: current.node_count(),
        other_nodes: other.node_count(),
        ..DiffCounts::default()
    };
    for divergence in &divergences {
        match divergence {
            Divergence::ComponentMismatch { .. } => counts.component_mismatches += 1,
            Divergence::Entry(entry) => {
                counts.entries += 1;
                counts.state_differences += entry.state_differences.len();
                counts.props_differences += entry.props_differences.len();
            }
        }
    }

    let classification = if identity.current_digest == identity.other_digest {
        DiffClassification::Identical
    } else if divergences.is_empty() {
        DiffClassification::NoDivergence
    } else {
        DiffClassification::Changed
    };

    DiffReport {
        diff_schema_version: 1,
        identity,
        classification,
        counts,
        divergences,
    }
}
