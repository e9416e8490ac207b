//! Host adapters implementing [`LiveNode`](crate::model::LiveNode).
//!
//! - [`memory`]: reference-counted in-memory tree, buildable by hand
//! - [`fixture`]: loads a JSON component-tree document into a memory tree

pub mod fixture;
pub mod memory;

pub use fixture::{load_fixture, load_fixture_str};
pub use memory::MemoryNode;
