//! Extracted component snapshot.

use crate::errors::{ExError, LensError};
use crate::model::SanitizedValue;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// Display name of a component without an identifiable name
pub const ANONYMOUS: &str = "Anonymous";

/// Immutable extracted representation of one component and its subtree
///
/// Fields are private: a snapshot is built once (by the extractor, or by
/// decoding a saved document) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    component: Option<String>,
    state: SanitizedValue,
    props: SanitizedValue,
    children: Vec<Snapshot>,
}

impl Snapshot {
    pub fn new(
        component: Option<String>,
        state: SanitizedValue,
        props: SanitizedValue,
        children: Vec<Snapshot>,
    ) -> Self {
        Self {
            component,
            state,
            props,
            children,
        }
    }

    /// Named component
    pub fn named(
        component: impl Into<String>,
        state: SanitizedValue,
        props: SanitizedValue,
        children: Vec<Snapshot>,
    ) -> Self {
        Self::new(Some(component.into()), state, props, children)
    }

    /// Component name, `None` for an anonymous layer
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    pub fn display_name(&self) -> &str {
        self.component.as_deref().unwrap_or(ANONYMOUS)
    }

    pub fn is_anonymous(&self) -> bool {
        self.component.is_none()
    }

    pub fn state(&self) -> &SanitizedValue {
        &self.state
    }

    pub fn props(&self) -> &SanitizedValue {
        &self.props
    }

    pub fn children(&self) -> &[Snapshot] {
        &self.children
    }

    /// Number of snapshot nodes in this subtree, root included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Snapshot::node_count).sum::<usize>()
    }

    /// SHA-256 (hex) of the canonical JSON form
    pub fn digest(&self) -> String {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }

    /// Decode a saved snapshot document
    ///
    /// # Errors
    ///
    /// `InvalidSnapshot` when the text is not a snapshot document.
    pub fn from_json_str(text: &str) -> Result<Self, ExError> {
        serde_json::from_str(text).map_err(|e| {
            ExError::from(LensError::InvalidSnapshot {
                reason: e.to_string(),
            })
            .with_op("decode_snapshot")
        })
    }

    /// Pretty JSON document of this snapshot
    ///
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String, ExError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ExError::from(LensError::from(e)).with_op("encode_snapshot"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf(name: &str, count: f64) -> Snapshot {
        Snapshot::named(
            name,
            SanitizedValue::object([("count", SanitizedValue::Number(count))]),
            SanitizedValue::empty_object(),
            vec![],
        )
    }

    #[test]
    fn test_node_count() {
        let tree = Snapshot::named(
            "App",
            SanitizedValue::empty_object(),
            SanitizedValue::empty_object(),
            vec![leaf("A", 1.0), leaf("B", 2.0)],
        );
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_anonymous_display_name() {
        let anon = Snapshot::new(None, SanitizedValue::Null, SanitizedValue::Null, vec![]);
        assert!(anon.is_anonymous());
        assert_eq!(anon.display_name(), ANONYMOUS);
    }

    #[test]
    fn test_digest_is_content_based() {
        assert_eq!(leaf("A", 1.0).digest(), leaf("A", 1.0).digest());
        assert_ne!(leaf("A", 1.0).digest(), leaf("A", 2.0).digest());
        assert_eq!(leaf("A", 1.0).digest().len(), 64);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(leaf("Counter", 1.0)).unwrap();
        assert_eq!(
            json,
            json!({"component": "Counter", "state": {"count": 1}, "props": {}, "children": []})
        );
        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, leaf("Counter", 1.0));
    }

    #[test]
    fn test_decode_rejects_non_snapshot() {
        let err = Snapshot::from_json_str(r#"{"component": "A"}"#).unwrap_err();
        assert_eq!(err.kind(), crate::errors::ExErrorKind::InvalidSnapshot);
        assert_eq!(err.op(), Some("decode_snapshot"));

        let text = leaf("A", 3.0).to_json_pretty().unwrap();
        assert_eq!(Snapshot::from_json_str(&text).unwrap(), leaf("A", 3.0));
    }
}
