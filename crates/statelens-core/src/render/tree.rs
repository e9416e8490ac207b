//! Snapshot tree renderer.
//!
//! ```text
//! App
//! ├─ Header
//! └─ Counter
//!     current: state={"count":1} props={}
//!     other: state={"count":2} props={}
//!     state differences:
//!     - /App.children[1].state.count: 1 !== 2
//!     props differences: none
//! ```
//!
//! Anonymous snapshot nodes draw no line; their children are drawn in their
//! place, at the same depth and with the same prefix. A component mismatch is
//! noted under the node drawn at its position, or after the tree when no
//! drawn node sits there.

use crate::config::{DiffLookup, InspectorConfig};
use crate::diff::{DiffEntry, Divergence};
use crate::model::{SanitizedValue, Snapshot};
use crate::render::{child_indent, connector, Line, StyleHint};
use serde_json::{json, Map};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Label of the current side in annotations
    pub left_label: String,
    /// Label of the other side in annotations
    pub right_label: String,
    pub diff_lookup: DiffLookup,
}

impl TreeOptions {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left_label: left.into(),
            right_label: right.into(),
            diff_lookup: DiffLookup::default(),
        }
    }

    pub fn from_config(config: &InspectorConfig) -> Self {
        Self {
            left_label: config.left_label.clone(),
            right_label: config.right_label.clone(),
            diff_lookup: config.diff_lookup,
        }
    }

    pub fn with_diff_lookup(mut self, lookup: DiffLookup) -> Self {
        self.diff_lookup = lookup;
        self
    }
}

/// Render `root`, annotating nodes that have a diff entry
///
/// `left` and `right` label the current and other sides in annotations.
pub fn render_tree(
    root: &Snapshot,
    divergences: &[Divergence],
    left: &str,
    right: &str,
) -> Vec<Line> {
    render_tree_with(root, divergences, &TreeOptions::new(left, right))
}

/// [`render_tree`] with explicit options
pub fn render_tree_with(
    root: &Snapshot,
    divergences: &[Divergence],
    options: &TreeOptions,
) -> Vec<Line> {
    let mut positions = HashSet::new();
    if options.diff_lookup == DiffLookup::Positional {
        collect_positions(root, "", &mut positions);
    }

    let mut renderer = TreeRenderer {
        entries: divergences.iter().filter_map(Divergence::as_entry).collect(),
        mismatches: divergences
            .iter()
            .filter(|d| matches!(d, Divergence::ComponentMismatch { .. }))
            .collect(),
        noted: HashSet::new(),
        positions,
        options,
        lines: Vec::new(),
    };
    renderer.node(root, "", 0, true, "");
    renderer.trailing_mismatches();
    renderer.lines
}

struct TreeRenderer<'a> {
    entries: Vec<&'a DiffEntry>,
    mismatches: Vec<&'a Divergence>,
    /// Indices into `mismatches` already noted under a node
    noted: HashSet<usize>,
    /// Entry paths of every node in the rendered tree (positional lookup only)
    positions: HashSet<String>,
    options: &'a TreeOptions,
    lines: Vec<Line>,
}

impl<'a> TreeRenderer<'a> {
    /// `path` is the position path the differ used for this node
    fn node(&mut self, node: &Snapshot, path: &str, depth: usize, is_last: bool, prefix: &str) {
        let name = node.display_name();
        let children = node.children();

        if node.is_anonymous() {
            for (i, child) in children.iter().enumerate() {
                let child_last = is_last && i + 1 == children.len();
                let child_path = format!("{}/{}.children[{}]", path, name, i);
                self.node(child, &child_path, depth, child_last, prefix);
            }
            return;
        }

        let (text, style) = if depth == 0 {
            (name.to_string(), StyleHint::Root)
        } else {
            (
                format!("{}{} {}", prefix, connector(is_last), name),
                StyleHint::Component,
            )
        };

        let child_prefix = if depth == 0 {
            prefix.to_string()
        } else {
            format!("{}{}", prefix, child_indent(is_last))
        };

        let own_path = format!("{}/{}", path, name);
        if let Some((index, mismatch)) = self.mismatch_at(path) {
            self.noted.insert(index);
            let (current, other) = mismatch_sides(mismatch);
            let mut sides = Map::new();
            sides.insert(self.options.left_label.clone(), json!(current));
            sides.insert(self.options.right_label.clone(), json!(other));
            self.lines
                .push(Line::styled(text, style).with_payload(json!({ "mismatch": sides })));
            self.lines.push(Line::styled(
                format!("{}  {}", child_prefix, mismatch.note()),
                StyleHint::Annotation,
            ));
        } else if let Some(entry) = self.lookup(&own_path, name) {
            let payload = self.payload(entry);
            self.lines.push(Line::styled(text, style).with_payload(payload));
            self.annotate(entry, &child_prefix);
        } else {
            self.lines.push(Line::styled(text, style));
        }

        for (i, child) in children.iter().enumerate() {
            let child_path = format!("{}/{}.children[{}]", path, name, i);
            self.node(child, &child_path, depth + 1, i + 1 == children.len(), &child_prefix);
        }
    }

    fn mismatch_at(&self, path: &str) -> Option<(usize, &'a Divergence)> {
        self.mismatches
            .iter()
            .enumerate()
            .find(|(_, d)| d.path() == path)
            .map(|(i, d)| (i, *d))
    }

    /// Mismatches with no drawn node at their position, as notices
    fn trailing_mismatches(&mut self) {
        let notices: Vec<Line> = self
            .mismatches
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.noted.contains(i))
            .map(|(_, mismatch)| Line::styled(mismatch.note(), StyleHint::Notice))
            .collect();
        self.lines.extend(notices);
    }

    fn lookup(&self, own_path: &str, name: &str) -> Option<&'a DiffEntry> {
        let suffix = format!("/{}", name);
        let found = match self.options.diff_lookup {
            DiffLookup::Suffix => self.entries.iter().find(|e| e.path.ends_with(&suffix)),
            DiffLookup::Positional => self.entries.iter().find(|e| e.path == own_path).or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.path.ends_with(&suffix) && !self.positions.contains(&e.path))
            }),
        };
        found.copied()
    }

    fn annotate(&mut self, entry: &DiffEntry, prefix: &str) {
        let mut texts = vec![
            format!(
                "{}: state={} props={}",
                self.options.left_label,
                compact(&entry.current.state),
                compact(&entry.current.props)
            ),
            format!(
                "{}: state={} props={}",
                self.options.right_label,
                compact(&entry.other.state),
                compact(&entry.other.props)
            ),
        ];
        for (title, notes) in [
            ("state", &entry.state_differences),
            ("props", &entry.props_differences),
        ] {
            if notes.is_empty() {
                texts.push(format!("{} differences: none", title));
            } else {
                texts.push(format!("{} differences:", title));
                texts.extend(notes.iter().map(|note| format!("- {}", note)));
            }
        }

        self.lines.extend(
            texts
                .into_iter()
                .map(|text| Line::styled(format!("{}  {}", prefix, text), StyleHint::Annotation)),
        );
    }

    fn payload(&self, entry: &DiffEntry) -> serde_json::Value {
        let mut sides = Map::new();
        sides.insert(
            self.options.left_label.clone(),
            json!({"state": entry.current.state.to_json(), "props": entry.current.props.to_json()}),
        );
        sides.insert(
            self.options.right_label.clone(),
            json!({"state": entry.other.state.to_json(), "props": entry.other.props.to_json()}),
        );
        json!({
            "sides": sides,
            "state_differences": entry.state_differences,
            "props_differences": entry.props_differences,
        })
    }
}

fn mismatch_sides(divergence: &Divergence) -> (&str, &str) {
    match divergence {
        Divergence::ComponentMismatch { current, other, .. } => (current.as_str(), other.as_str()),
        Divergence::Entry(entry) => (entry.component(), entry.component()),
    }
}

fn collect_positions(node: &Snapshot, path: &str, out: &mut HashSet<String>) {
    let name = node.display_name();
    out.insert(format!("{}/{}", path, name));
    for (i, child) in node.children().iter().enumerate() {
        collect_positions(child, &format!("{}/{}.children[{}]", path, name, i), out);
    }
}

fn compact(value: &SanitizedValue) -> String {
    value.to_json().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff_trees;

    fn leaf(name: &str) -> Snapshot {
        Snapshot::named(
            name,
            SanitizedValue::empty_object(),
            SanitizedValue::empty_object(),
            vec![],
        )
    }

    fn branch(name: &str, children: Vec<Snapshot>) -> Snapshot {
        Snapshot::named(
            name,
            SanitizedValue::empty_object(),
            SanitizedValue::empty_object(),
            children,
        )
    }

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_connectors_and_prefixes() {
        let tree = branch(
            "App",
            vec![
                branch("Nav", vec![leaf("Link"), leaf("Link2")]),
                branch("Main", vec![leaf("Card")]),
            ],
        );
        let lines = render_tree(&tree, &[], "current", "other");
        assert_eq!(
            texts(&lines),
            vec![
                "App",
                "├─ Nav",
                "| ├─ Link",
                "| └─ Link2",
                "└─ Main",
                "  └─ Card",
            ]
        );
        assert_eq!(lines[0].style, Some(StyleHint::Root));
        assert_eq!(lines[1].style, Some(StyleHint::Component));
    }

    #[test]
    fn test_anonymous_node_is_flat() {
        let anon = Snapshot::new(
            None,
            SanitizedValue::empty_object(),
            SanitizedValue::empty_object(),
            vec![leaf("A"), leaf("B")],
        );
        let tree = branch("App", vec![anon, leaf("C")]);
        let lines = render_tree(&tree, &[], "current", "other");
        assert_eq!(texts(&lines), vec!["App", "├─ A", "├─ B", "└─ C"]);
    }

    #[test]
    fn test_annotation_block() {
        let counter = |n: f64| {
            Snapshot::named(
                "Counter",
                SanitizedValue::object([("count", SanitizedValue::Number(n))]),
                SanitizedValue::empty_object(),
                vec![],
            )
        };
        let a = branch("App", vec![counter(1.0)]);
        let b = branch("App", vec![counter(2.0)]);
        let lines = render_tree(&a, &diff_trees(&a, &b), "alice", "bob");

        assert_eq!(
            texts(&lines),
            vec![
                "App",
                "└─ Counter",
                r#"    alice: state={"count":1} props={}"#,
                r#"    bob: state={"count":2} props={}"#,
                "    state differences:",
                "    - /App.children[0].state.count: 1 !== 2",
                "    props differences: none",
            ]
        );
        let payload = lines[1].payload.as_ref().unwrap();
        assert_eq!(payload["sides"]["bob"]["state"]["count"], 2);
        assert_eq!(lines[2].style, Some(StyleHint::Annotation));
    }

    fn items(last: f64) -> Snapshot {
        let item = |v: f64| {
            Snapshot::named(
                "Item",
                SanitizedValue::object([("v", SanitizedValue::Number(v))]),
                SanitizedValue::empty_object(),
                vec![],
            )
        };
        branch("List", vec![item(1.0), item(last)])
    }

    #[test]
    fn test_suffix_lookup_annotates_every_same_named_node() {
        let (a, b) = (items(5.0), items(6.0));
        let lines = render_tree(&a, &diff_trees(&a, &b), "current", "other");

        assert_eq!(lines[1].text, "├─ Item");
        assert!(lines[1].payload.is_some());
        let second = lines.iter().position(|l| l.text == "└─ Item").unwrap();
        assert!(lines[second].payload.is_some());
    }

    #[test]
    fn test_positional_lookup_prefers_own_position() {
        let (a, b) = (items(5.0), items(6.0));
        let options =
            TreeOptions::new("current", "other").with_diff_lookup(DiffLookup::Positional);
        let lines = render_tree_with(&a, &diff_trees(&a, &b), &options);

        assert_eq!(lines[1].text, "├─ Item");
        assert!(lines[1].payload.is_none());
        assert_eq!(lines[2].text, "└─ Item");
        assert!(lines[2].payload.is_some());
    }

    #[test]
    fn test_suffix_match_for_foreign_paths() {
        let counter = |n: f64| {
            Snapshot::named(
                "Counter",
                SanitizedValue::object([("count", SanitizedValue::Number(n))]),
                SanitizedValue::empty_object(),
                vec![],
            )
        };
        // diffed as roots, rendered nested
        let divergences = diff_trees(&counter(1.0), &counter(2.0));
        let tree = branch("App", vec![counter(1.0)]);
        let lines = render_tree(&tree, &divergences, "current", "other");
        assert_eq!(lines[1].text, "└─ Counter");
        assert!(lines[1].payload.is_some());
        assert_eq!(lines[5].text, "    - .state.count: 1 !== 2");

        let options =
            TreeOptions::new("current", "other").with_diff_lookup(DiffLookup::Positional);
        let lines = render_tree_with(&tree, &divergences, &options);
        assert!(lines[1].payload.is_some());
    }

    #[test]
    fn test_component_mismatch_noted_under_node() {
        let a = branch("App", vec![leaf("Counter")]);
        let b = branch("App", vec![leaf("Timer")]);
        let lines = render_tree(&a, &diff_trees(&a, &b), "alice", "bob");

        assert_eq!(
            texts(&lines),
            vec!["App", "└─ Counter", "    /App.children[0]: Counter !== Timer"]
        );
        assert_eq!(lines[2].style, Some(StyleHint::Annotation));
        let payload = lines[1].payload.as_ref().unwrap();
        assert_eq!(payload["mismatch"]["alice"], "Counter");
        assert_eq!(payload["mismatch"]["bob"], "Timer");
    }

    #[test]
    fn test_unplaced_mismatch_becomes_notice() {
        let divergences = diff_trees(
            &branch("App", vec![leaf("Counter")]),
            &branch("App", vec![leaf("Timer")]),
        );
        let tree = branch("Shell", vec![leaf("Counter")]);
        let lines = render_tree(&tree, &divergences, "current", "other");

        assert_eq!(lines.len(), 3);
        let last = lines.last().unwrap();
        assert_eq!(last.text, "/App.children[0]: Counter !== Timer");
        assert_eq!(last.style, Some(StyleHint::Notice));
    }
}
