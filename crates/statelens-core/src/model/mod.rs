pub mod live;
pub mod sanitized;
pub mod snapshot;
pub mod value;

pub use live::LiveNode;
pub use sanitized::{Retained, SanitizedValue};
pub use snapshot::{Snapshot, ANONYMOUS};
pub use value::{ArrayRef, Identity, ObjectRef, Value};
