//! JSON fixture loader.
//!
//! A fixture describes a live component tree:
//!
//! ```json
//! {
//!   "name": "App",
//!   "state": {"count": 1},
//!   "props": {"onClick": {"$fn": "handleClick"}},
//!   "host": "div#root",
//!   "children": [{"children": [{"name": "Button"}]}]
//! }
//! ```
//!
//! A node without `name` is a wrapper. A document that is just `null` has no
//! root.

use crate::adapter::MemoryNode;
use crate::errors::{ExError, ExErrorKind, LensError};
use crate::model::Value;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    state: Option<serde_json::Value>,
    #[serde(default)]
    props: Option<serde_json::Value>,
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    children: Vec<FixtureNode>,
}

impl FixtureNode {
    fn build(&self) -> MemoryNode {
        let node = match &self.name {
            Some(name) => MemoryNode::component(name.clone()),
            None => MemoryNode::wrapper(),
        };
        let node = node
            .with_state(self.state.as_ref().map(Value::from_json).unwrap_or_default())
            .with_props(self.props.as_ref().map(Value::from_json).unwrap_or_default());
        let node = match &self.host {
            Some(host) => node.with_host(host.clone()),
            None => node,
        };
        node.with_children(self.children.iter().map(FixtureNode::build))
    }
}

/// Parse a fixture document
///
/// # Errors
///
/// `InvalidFixture` when the text is not JSON or does not describe a tree.
pub fn load_fixture_str(text: &str) -> Result<Option<MemoryNode>, ExError> {
    let root: Option<FixtureNode> = serde_json::from_str(text).map_err(|e| {
        ExError::from(LensError::InvalidFixture {
            reason: e.to_string(),
        })
        .with_op("load_fixture")
    })?;
    Ok(root.as_ref().map(FixtureNode::build))
}

/// Read and parse a fixture file
///
/// # Errors
///
/// `Io` when the file cannot be read, `InvalidFixture` when it cannot be parsed.
pub fn load_fixture(path: &Path) -> Result<Option<MemoryNode>, ExError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("load_fixture")
            .with_path(path.display().to_string())
            .with_message(e.to_string())
    })?;
    load_fixture_str(&text).map_err(|e| e.with_path(path.display().to_string()))
}
