//! Lookups over a live tree.

use crate::model::{Identity, LiveNode};
use std::collections::HashSet;

/// First entry of a fragment member listing
pub const FRAGMENT_MARKER: &str = "<Fragment />";

/// Follow first-child links from `root` until the named component is found
pub fn find_component<N: LiveNode>(root: &N, name: &str) -> Option<N> {
    first_child_chain(root).find(|node| node.component_name().as_deref() == Some(name))
}

/// Host element of `node`, or of the nearest node down its first-child chain
pub fn find_host_element<N: LiveNode>(node: &N) -> Option<String> {
    first_child_chain(node).find_map(|n| n.host_element())
}

/// The sibling chain starting at `first`, headed by [`FRAGMENT_MARKER`]
///
/// Named members are listed by component name, the others by their host
/// element. Members with neither are skipped.
pub fn fragment_members<N: LiveNode>(first: &N) -> Vec<String> {
    let mut members = vec![FRAGMENT_MARKER.to_string()];
    let mut seen = HashSet::new();
    let mut cursor = Some(first.clone());
    while let Some(node) = cursor {
        if !seen.insert(node.identity()) {
            break;
        }
        if let Some(member) = node.component_name().or_else(|| node.host_element()) {
            members.push(member);
        }
        cursor = node.next_sibling();
    }
    members
}

/// `node`, its first child, that child's first child, and so on
fn first_child_chain<N: LiveNode>(node: &N) -> impl Iterator<Item = N> {
    let mut seen: HashSet<Identity> = HashSet::new();
    let mut cursor = Some(node.clone());
    std::iter::from_fn(move || {
        let current = cursor.take()?;
        if !seen.insert(current.identity()) {
            return None;
        }
        cursor = current.first_child();
        Some(current)
    })
}
