//! Live-tree traversal.
//!
//! - [`extract`]: live tree to [`Snapshot`](crate::model::Snapshot)
//! - [`live`]: lookups over the live tree (application component, host
//!   element, fragment members)

pub mod extract;
pub mod live;

pub use extract::extract;
pub use live::{find_component, find_host_element, fragment_members, FRAGMENT_MARKER};
