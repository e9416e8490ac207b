//! In-memory live tree.

use crate::model::{Identity, LiveNode, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct NodeCell {
    name: Option<String>,
    state: RefCell<Value>,
    props: RefCell<Value>,
    host: RefCell<Option<String>>,
    child: RefCell<Option<MemoryNode>>,
    sibling: RefCell<Option<MemoryNode>>,
}

/// A node of an in-memory component tree
///
/// Links are plain shared references, so a malformed tree (a child pointing
/// back at an ancestor, a sibling chain looping on itself) can be built with
/// [`set_first_child`](Self::set_first_child) and
/// [`set_next_sibling`](Self::set_next_sibling).
#[derive(Clone)]
pub struct MemoryNode(Rc<NodeCell>);

impl MemoryNode {
    fn with_name(name: Option<String>) -> Self {
        Self(Rc::new(NodeCell {
            name,
            state: RefCell::new(Value::Undefined),
            props: RefCell::new(Value::Undefined),
            host: RefCell::new(None),
            child: RefCell::new(None),
            sibling: RefCell::new(None),
        }))
    }

    /// Named component node
    pub fn component(name: impl Into<String>) -> Self {
        Self::with_name(Some(name.into()))
    }

    /// Host wrapper or anonymous node
    pub fn wrapper() -> Self {
        Self::with_name(None)
    }

    pub fn with_state(self, state: Value) -> Self {
        *self.0.state.borrow_mut() = state;
        self
    }

    pub fn with_props(self, props: Value) -> Self {
        *self.0.props.borrow_mut() = props;
        self
    }

    pub fn with_host(self, host: impl Into<String>) -> Self {
        *self.0.host.borrow_mut() = Some(host.into());
        self
    }

    pub fn with_children<I: IntoIterator<Item = MemoryNode>>(self, children: I) -> Self {
        for child in children {
            self.append_child(child);
        }
        self
    }

    /// Append at the end of this node's child chain
    pub fn append_child(&self, child: MemoryNode) {
        let Some(mut last) = self.first_child() else {
            self.set_first_child(Some(child));
            return;
        };
        while let Some(next) = last.next_sibling() {
            last = next;
        }
        last.set_next_sibling(Some(child));
    }

    pub fn set_first_child(&self, child: Option<MemoryNode>) {
        *self.0.child.borrow_mut() = child;
    }

    pub fn set_next_sibling(&self, sibling: Option<MemoryNode>) {
        *self.0.sibling.borrow_mut() = sibling;
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }
}

impl LiveNode for MemoryNode {
    fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    fn component_name(&self) -> Option<String> {
        self.0.name.clone()
    }

    fn state(&self) -> Value {
        self.0.state.borrow().clone()
    }

    fn props(&self) -> Value {
        self.0.props.borrow().clone()
    }

    fn first_child(&self) -> Option<Self> {
        self.0.child.borrow().clone()
    }

    fn next_sibling(&self) -> Option<Self> {
        self.0.sibling.borrow().clone()
    }

    fn host_element(&self) -> Option<String> {
        self.0.host.borrow().clone()
    }
}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryNode({})", self.name().unwrap_or("<wrapper>"))
    }
}
