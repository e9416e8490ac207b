//! Snapshot extraction.
//!
//! Depth-first, pre-order walk over a [`LiveNode`] tree. Named nodes become
//! [`Snapshot`] nodes; wrapper nodes are invisible and their materialized
//! children take the wrapper's place in the parent's child list. Every handle
//! is recorded in a seen-set scoped to one call: a handle met again yields
//! nothing, and a sibling chain that loops back ends there.

use crate::model::{Identity, LiveNode, SanitizedValue, Snapshot, Value};
use crate::sanitize::Sanitizer;
use std::collections::HashSet;

/// Extract a sanitized snapshot tree from `root`
///
/// Returns `None` when there is no root. If the root is a wrapper, the result
/// is an anonymous snapshot holding the root's children, or that single child
/// when there is exactly one.
pub fn extract<N: LiveNode>(root: Option<&N>, sanitizer: &Sanitizer) -> Option<Snapshot> {
    let root = root?;
    let mut seen = HashSet::new();

    if root.component_name().is_some() {
        return materialize(root, sanitizer, &mut seen).pop();
    }

    seen.insert(root.identity());
    let mut children = collect_children(root, sanitizer, &mut seen);
    if children.len() == 1 {
        return children.pop();
    }
    let (state, props) = node_values(root, sanitizer);
    Some(Snapshot::new(None, state, props, children))
}

/// Snapshots contributed by `node` at its position: one for a named node,
/// the spliced children for a wrapper, none for a repeat visit
fn materialize<N: LiveNode>(
    node: &N,
    sanitizer: &Sanitizer,
    seen: &mut HashSet<Identity>,
) -> Vec<Snapshot> {
    if !seen.insert(node.identity()) {
        return Vec::new();
    }

    match node.component_name() {
        Some(name) => {
            let (state, props) = node_values(node, sanitizer);
            let children = collect_children(node, sanitizer, seen);
            vec![Snapshot::named(name, state, props, children)]
        }
        None => collect_children(node, sanitizer, seen),
    }
}

fn collect_children<N: LiveNode>(
    node: &N,
    sanitizer: &Sanitizer,
    seen: &mut HashSet<Identity>,
) -> Vec<Snapshot> {
    let mut children = Vec::new();
    let mut cursor = node.first_child();
    while let Some(child) = cursor {
        if seen.contains(&child.identity()) {
            break;
        }
        children.extend(materialize(&child, sanitizer, seen));
        cursor = child.next_sibling();
    }
    children
}

fn node_values<N: LiveNode>(node: &N, sanitizer: &Sanitizer) -> (SanitizedValue, SanitizedValue) {
    let state = sanitizer.sanitize_state(&or_empty(node.state()));
    let props = sanitizer.sanitize_props(&or_empty(node.props()));
    (state, props)
}

fn or_empty(value: Value) -> Value {
    if value.is_absent() {
        Value::empty_object()
    } else {
        value
    }
}
