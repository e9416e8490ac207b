//! Live tree renderer.
//!
//! Draws a [`LiveNode`] tree directly, without extracting a snapshot. The
//! root line carries the configured root label; named nodes carry their
//! host element as payload. Unnamed nodes draw nothing, but unlike the
//! snapshot renderer their children still move one level deeper.

use crate::config::InspectorConfig;
use crate::model::{Identity, LiveNode};
use crate::render::{child_indent, connector, Line, StyleHint};
use crate::traversal::find_host_element;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LiveTreeOptions {
    pub root_label: String,
    /// Components drawn without a host element payload
    pub host_payload_exempt: Vec<String>,
}

impl Default for LiveTreeOptions {
    fn default() -> Self {
        Self::from_config(&InspectorConfig::default())
    }
}

impl LiveTreeOptions {
    pub fn from_config(config: &InspectorConfig) -> Self {
        Self {
            root_label: config.root_label.clone(),
            host_payload_exempt: config.host_payload_exempt.clone(),
        }
    }
}

/// Render the live tree under `root`
pub fn render_live<N: LiveNode>(root: &N, options: &LiveTreeOptions) -> Vec<Line> {
    let mut renderer = LiveRenderer {
        options,
        seen: HashSet::new(),
        lines: Vec::new(),
    };
    renderer.node(root, 0, true, "");
    renderer.lines
}

struct LiveRenderer<'a> {
    options: &'a LiveTreeOptions,
    seen: HashSet<Identity>,
    lines: Vec<Line>,
}

impl LiveRenderer<'_> {
    fn node<N: LiveNode>(&mut self, node: &N, depth: usize, is_last: bool, prefix: &str) {
        if !self.seen.insert(node.identity()) {
            return;
        }

        let lead = if depth == 0 {
            String::new()
        } else {
            format!("{}{} ", prefix, connector(is_last))
        };

        if depth == 0 {
            let line = Line::styled(self.options.root_label.clone(), StyleHint::Root);
            self.lines.push(with_host(line, find_host_element(node)));
        } else if let Some(name) = node.component_name() {
            let line = Line::styled(format!("{}{}", lead, name), StyleHint::Component);
            let host = if self.options.host_payload_exempt.contains(&name) {
                None
            } else {
                find_host_element(node)
            };
            self.lines.push(with_host(line, host));
        }

        let children = self.sibling_chain(node.first_child());
        let child_prefix = format!("{}{}", prefix, child_indent(is_last));
        for (i, child) in children.iter().enumerate() {
            self.node(child, depth + 1, i + 1 == children.len(), &child_prefix);
        }
    }

    /// Sibling chain from `first`, cut where it loops back or reaches a
    /// node already drawn
    fn sibling_chain<N: LiveNode>(&self, first: Option<N>) -> Vec<N> {
        let mut chain = Vec::new();
        let mut in_chain = HashSet::new();
        let mut cursor = first;
        while let Some(node) = cursor {
            let id = node.identity();
            if self.seen.contains(&id) || !in_chain.insert(id) {
                break;
            }
            cursor = node.next_sibling();
            chain.push(node);
        }
        chain
    }
}

/// Draw a fragment member listing as produced by
/// [`fragment_members`](crate::traversal::fragment_members): the marker as the
/// root line, the members as its children
pub fn render_fragment(members: &[String]) -> Vec<Line> {
    let Some((marker, rest)) = members.split_first() else {
        return Vec::new();
    };
    let mut lines = vec![Line::styled(marker.clone(), StyleHint::Root)];
    let indent = child_indent(true);
    for (i, member) in rest.iter().enumerate() {
        let is_last = i + 1 == rest.len();
        lines.push(Line::styled(
            format!("{}{} {}", indent, connector(is_last), member),
            StyleHint::Component,
        ));
    }
    lines
}

fn with_host(line: Line, host: Option<String>) -> Line {
    match host {
        Some(host) => line.with_payload(serde_json::Value::String(host)),
        None => line,
    }
}
