//! Cycle-safe text encoding of live values.
//!
//! [`CircularSafeSerializer`] turns an arbitrary, possibly self-referential
//! [`Value`] graph into JSON text. Every container is emitted at most once per
//! call: a second encounter (a cycle, or a sub-object shared by two parents) is
//! replaced by the omission marker, which behaves like `undefined` does for
//! `JSON.stringify` (dropped from objects, `null` inside arrays).

use crate::model::{Identity, Value};
use serde_json::{Map, Number};
use std::collections::HashSet;

/// Cycle-safe JSON encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularSafeSerializer {
    pretty: bool,
}

impl CircularSafeSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output instead of compact output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Encode `value` as JSON text
    ///
    /// A top-level value that encodes to nothing (a function or `undefined`)
    /// yields `null`.
    pub fn encode(&self, value: &Value) -> String {
        let json = self.to_json(value);
        let text = if self.pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        };
        text.unwrap_or_else(|_| "null".to_string())
    }

    /// Encode `value` as a JSON document
    pub fn to_json(&self, value: &Value) -> serde_json::Value {
        let mut seen = HashSet::new();
        encode_value(value, &mut seen).unwrap_or(serde_json::Value::Null)
    }
}

/// Compact encoding with a fresh serializer
pub fn encode(value: &Value) -> String {
    CircularSafeSerializer::new().encode(value)
}

/// `None` is the omission marker.
fn encode_value(value: &Value, seen: &mut HashSet<Identity>) -> Option<serde_json::Value> {
    if let Some(id) = value.identity() {
        if !seen.insert(id) {
            return None;
        }
    }

    match value {
        Value::Undefined | Value::Function(_) => None,
        Value::Null => Some(serde_json::Value::Null),
        Value::Bool(b) => Some(serde_json::Value::Bool(*b)),
        Value::Number(n) => Some(number_to_json(*n)),
        Value::String(s) => Some(serde_json::Value::String(s.clone())),
        Value::Array(items) => Some(serde_json::Value::Array(
            items
                .items()
                .iter()
                .map(|item| encode_value(item, seen).unwrap_or(serde_json::Value::Null))
                .collect(),
        )),
        Value::Object(entries) => {
            let mut map = Map::new();
            for (key, member) in entries.entries() {
                if let Some(encoded) = encode_value(&member, seen) {
                    map.insert(key, encoded);
                }
            }
            Some(serde_json::Value::Object(map))
        }
    }
}

/// JSON number for an `f64`: integral values stay integral, non-finite become `null`
pub fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Number formatted the way JavaScript prints it in a template string
pub fn number_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}
