//! Boundary to the host's live component tree.

use crate::model::{Identity, Value};

/// Read-only handle into a live component tree
///
/// A host adapter implements this over whatever the runtime exposes. Children
/// of a node are its first child followed by that child's sibling chain.
/// Handles are cheap to clone; `identity` must be stable for the lifetime of
/// an inspection call since it drives the cycle guard.
pub trait LiveNode: Clone {
    fn identity(&self) -> Identity;

    /// Component name, `None` for host wrappers and anonymous components
    fn component_name(&self) -> Option<String>;

    fn state(&self) -> Value;

    fn props(&self) -> Value;

    fn first_child(&self) -> Option<Self>;

    fn next_sibling(&self) -> Option<Self>;

    /// Description of the host element rendered by this node, if any
    fn host_element(&self) -> Option<String> {
        None
    }
}
