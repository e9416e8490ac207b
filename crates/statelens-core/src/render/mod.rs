//! Text rendering of component trees.
//!
//! Renderers are pure: they turn a tree into a sequence of [`Line`]s and
//! never write anywhere. Delivery is the job of a [`Sink`].

pub mod live;
pub mod sink;
pub mod tree;

pub use live::{render_fragment, render_live, LiveTreeOptions};
pub use sink::{
    emit_all, not_found_notice, BufferSink, JsonLinesSink, Line, Sink, StyleHint, WriterSink,
    ROOT_NOT_FOUND,
};
pub use tree::{render_tree, render_tree_with, TreeOptions};

/// Branch connector for a non-last child
pub const TEE: &str = "├─";
/// Branch connector for the last child
pub const CORNER: &str = "└─";

/// Prefix addition for the children of a node
pub(crate) fn child_indent(is_last: bool) -> &'static str {
    if is_last {
        "  "
    } else {
        "| "
    }
}

pub(crate) fn connector(is_last: bool) -> &'static str {
    if is_last {
        CORNER
    } else {
        TEE
    }
}
