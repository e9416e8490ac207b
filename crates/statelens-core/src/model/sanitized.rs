//! Sanitized value tree.
//!
//! Output of the sanitizer: an owned, acyclic copy of a live value with
//! bookkeeping keys and callables removed. Three leaves carry what the
//! sanitizer could not copy structurally: [`SanitizedValue::Retained`] (the
//! original reference met a second time), [`SanitizedValue::Cyclic`] (the
//! explicit marker variant of the same) and [`SanitizedValue::Redacted`].
//!
//! Equality is structural: a retained original equals the plain value its
//! cycle-safe encoding decodes to, so a shared sub-object met twice compares
//! like two copies of it.

use crate::encode::{self, number_text, number_to_json};
use crate::model::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use statelens_core_types::{Sensitive, REDACTED};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Text used for the explicit cycle marker
pub const CYCLIC_MARKER: &str = "[Circular]";

/// An original, unsanitized container kept by the legacy cycle guard
///
/// Compared and displayed through its cycle-safe encoding, so two retained
/// references from different sessions are equal when their content is.
#[derive(Clone)]
pub struct Retained(Value);

impl Retained {
    pub fn new(original: Value) -> Self {
        Self(original)
    }

    pub fn original(&self) -> &Value {
        &self.0
    }

    pub fn encoded(&self) -> String {
        encode::encode(&self.0)
    }

    /// Plain sanitized-value form of the cycle-safe encoding
    pub fn structural(&self) -> SanitizedValue {
        SanitizedValue::from(encode::CircularSafeSerializer::new().to_json(&self.0))
    }
}

impl PartialEq for Retained {
    fn eq(&self, other: &Self) -> bool {
        self.encoded() == other.encoded()
    }
}

impl fmt::Debug for Retained {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Retained({})", self.encoded())
    }
}

#[derive(Debug, Clone, Default)]
pub enum SanitizedValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Only produced when the sanitized input itself was a function
    Function(String),
    Array(Vec<SanitizedValue>),
    Object(BTreeMap<String, SanitizedValue>),
    Retained(Retained),
    Cyclic,
    Redacted(Sensitive<Box<SanitizedValue>>),
}

impl SanitizedValue {
    pub fn empty_object() -> Self {
        SanitizedValue::Object(BTreeMap::new())
    }

    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, SanitizedValue)>,
        K: Into<String>,
    {
        SanitizedValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Arrays and objects; the only values the differ descends into
    ///
    /// A retained original counts through its [`resolved`](Self::resolved) form.
    pub fn is_composite(&self) -> bool {
        matches!(
            self.resolved().as_ref(),
            SanitizedValue::Array(_) | SanitizedValue::Object(_)
        )
    }

    /// Retained originals replaced by their structural form, anything else as is
    pub fn resolved(&self) -> Cow<'_, SanitizedValue> {
        match self {
            SanitizedValue::Retained(r) => Cow::Owned(r.structural()),
            _ => Cow::Borrowed(self),
        }
    }

    /// Member lookup on objects
    pub fn get(&self, key: &str) -> Option<&SanitizedValue> {
        match self {
            SanitizedValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Keyed view of a composite: object members in key order, array items by index
    pub fn entries(&self) -> Vec<(String, &SanitizedValue)> {
        match self {
            SanitizedValue::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            SanitizedValue::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Strict equality as used by the differ
    ///
    /// `NaN` equals itself, retained originals compare structurally and
    /// redacted values by their hidden content.
    pub fn same_as(&self, other: &SanitizedValue) -> bool {
        use SanitizedValue as V;
        match (self, other) {
            (V::Retained(_), _) | (_, V::Retained(_)) => {
                self.resolved().same_as(other.resolved().as_ref())
            }
            (V::Undefined, V::Undefined) | (V::Null, V::Null) | (V::Cyclic, V::Cyclic) => true,
            (V::Bool(a), V::Bool(b)) => a == b,
            (V::Number(a), V::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (V::String(a), V::String(b)) | (V::Function(a), V::Function(b)) => a == b,
            (V::Array(a), V::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_as(y))
            }
            (V::Object(a), V::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.same_as(vb))
            }
            (V::Redacted(a), V::Redacted(b)) => a.expose().same_as(b.expose()),
            _ => false,
        }
    }

    /// Text of the value as it appears in a difference note
    pub fn display_text(&self) -> String {
        match self {
            SanitizedValue::Undefined => "undefined".to_string(),
            SanitizedValue::Null => "null".to_string(),
            SanitizedValue::Bool(b) => b.to_string(),
            SanitizedValue::Number(n) => number_text(*n),
            SanitizedValue::String(s) => s.clone(),
            SanitizedValue::Function(name) => format!("[Function: {}]", name),
            SanitizedValue::Array(_) | SanitizedValue::Object(_) => self.to_json().to_string(),
            SanitizedValue::Retained(r) => r.encoded(),
            SanitizedValue::Cyclic => CYCLIC_MARKER.to_string(),
            SanitizedValue::Redacted(_) => REDACTED.to_string(),
        }
    }

    /// JSON form, following `JSON.stringify` conventions for undefined members
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SanitizedValue::Undefined | SanitizedValue::Null | SanitizedValue::Function(_) => {
                serde_json::Value::Null
            }
            SanitizedValue::Bool(b) => serde_json::Value::Bool(*b),
            SanitizedValue::Number(n) => number_to_json(*n),
            SanitizedValue::String(s) => serde_json::Value::String(s.clone()),
            SanitizedValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(SanitizedValue::to_json).collect())
            }
            SanitizedValue::Object(map) => serde_json::Value::Object(
                map.iter()
                    .filter(|(_, v)| {
                        !matches!(v, SanitizedValue::Undefined | SanitizedValue::Function(_))
                    })
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            SanitizedValue::Retained(r) => {
                encode::CircularSafeSerializer::new().to_json(r.original())
            }
            SanitizedValue::Cyclic => serde_json::Value::String(CYCLIC_MARKER.to_string()),
            SanitizedValue::Redacted(_) => serde_json::Value::String(REDACTED.to_string()),
        }
    }
}

impl PartialEq for SanitizedValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Serialize for SanitizedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SanitizedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(SanitizedValue::from)
    }
}

impl From<serde_json::Value> for SanitizedValue {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => SanitizedValue::Null,
            serde_json::Value::Bool(b) => SanitizedValue::Bool(b),
            serde_json::Value::Number(n) => SanitizedValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => SanitizedValue::String(s),
            serde_json::Value::Array(items) => {
                SanitizedValue::Array(items.into_iter().map(SanitizedValue::from).collect())
            }
            serde_json::Value::Object(map) => SanitizedValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, SanitizedValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Rebuild a live value from sanitized output (used to re-sanitize)
impl From<&SanitizedValue> for Value {
    fn from(value: &SanitizedValue) -> Self {
        match value {
            SanitizedValue::Undefined => Value::Undefined,
            SanitizedValue::Null => Value::Null,
            SanitizedValue::Bool(b) => Value::Bool(*b),
            SanitizedValue::Number(n) => Value::Number(*n),
            SanitizedValue::String(s) => Value::String(s.clone()),
            SanitizedValue::Function(name) => Value::Function(name.clone()),
            SanitizedValue::Array(items) => Value::array(items.iter().map(Value::from)),
            SanitizedValue::Object(map) => {
                Value::object(map.iter().map(|(k, v)| (k.clone(), Value::from(v))))
            }
            SanitizedValue::Retained(r) => r.original().clone(),
            SanitizedValue::Cyclic => Value::String(CYCLIC_MARKER.to_string()),
            SanitizedValue::Redacted(inner) => Value::from(inner.expose().as_ref()),
        }
    }
}
