//! State and props sanitization.
//!
//! Deep-copies a live [`Value`] into a [`SanitizedValue`], dropping private
//! keys, bookkeeping keys and callables. Containers are tracked in an identity
//! seen-set scoped to one top-level call; what happens on a repeat encounter is
//! governed by [`CycleMode`].
//!
//! State values additionally surface their `next` chain: `next` is on the
//! state blocklist, but a truthy `next` member is sanitized explicitly and
//! attached, so chained hook and queue state stays visible.

use crate::config::{CycleMode, InspectorConfig};
use crate::model::{Identity, Retained, SanitizedValue, Value};
use statelens_core_types::Sensitive;
use std::collections::{BTreeMap, HashSet};

/// Member name of the chained state successor
const NEXT_KEY: &str = "next";

/// Which blob of a node is being sanitized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    State,
    Props,
}

/// Filtering rules for one kind of blob
#[derive(Debug, Clone)]
pub struct SanitizeRules {
    kind: ValueKind,
    private_prefixes: Vec<String>,
    blocklist: HashSet<String>,
    redact_keys: HashSet<String>,
    cycle_mode: CycleMode,
}

impl SanitizeRules {
    pub fn for_kind(kind: ValueKind, config: &InspectorConfig) -> Self {
        let blocklist = match kind {
            ValueKind::State => &config.state_blocklist,
            ValueKind::Props => &config.props_blocklist,
        };
        Self {
            kind,
            private_prefixes: config.private_prefixes.clone(),
            blocklist: blocklist.iter().cloned().collect(),
            redact_keys: config.redact_keys.iter().cloned().collect(),
            cycle_mode: config.cycle_mode,
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether a member survives sanitization
    pub fn keeps(&self, key: &str, value: &Value) -> bool {
        !self
            .private_prefixes
            .iter()
            .any(|prefix| key.starts_with(prefix.as_str()))
            && !self.blocklist.contains(key)
            && !matches!(value, Value::Function(_))
    }

    fn redacts(&self, key: &str) -> bool {
        self.redact_keys.contains(key)
    }

    fn follows_next(&self) -> bool {
        self.kind == ValueKind::State
    }
}

/// Sanitizer for both kinds of blob
#[derive(Debug, Clone)]
pub struct Sanitizer {
    state: SanitizeRules,
    props: SanitizeRules,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(&InspectorConfig::default())
    }
}

impl Sanitizer {
    pub fn new(config: &InspectorConfig) -> Self {
        Self {
            state: SanitizeRules::for_kind(ValueKind::State, config),
            props: SanitizeRules::for_kind(ValueKind::Props, config),
        }
    }

    pub fn rules(&self, kind: ValueKind) -> &SanitizeRules {
        match kind {
            ValueKind::State => &self.state,
            ValueKind::Props => &self.props,
        }
    }

    /// Sanitize a state blob with a fresh seen-set
    pub fn sanitize_state(&self, value: &Value) -> SanitizedValue {
        sanitize(value, &self.state, &mut HashSet::new())
    }

    /// Sanitize a props blob with a fresh seen-set
    pub fn sanitize_props(&self, value: &Value) -> SanitizedValue {
        sanitize(value, &self.props, &mut HashSet::new())
    }
}

/// Recursively sanitize `value`, recording visited containers in `seen`
///
/// Non-container values are returned unchanged. Excluded array items leave a
/// hole (`Undefined`) so indices are preserved.
pub fn sanitize(
    value: &Value,
    rules: &SanitizeRules,
    seen: &mut HashSet<Identity>,
) -> SanitizedValue {
    if let Some(id) = value.identity() {
        if !seen.insert(id) {
            return match rules.cycle_mode {
                CycleMode::Retain => SanitizedValue::Retained(Retained::new(value.clone())),
                CycleMode::Marker => SanitizedValue::Cyclic,
            };
        }
    }

    match value {
        Value::Undefined => SanitizedValue::Undefined,
        Value::Null => SanitizedValue::Null,
        Value::Bool(b) => SanitizedValue::Bool(*b),
        Value::Number(n) => SanitizedValue::Number(*n),
        Value::String(s) => SanitizedValue::String(s.clone()),
        Value::Function(name) => SanitizedValue::Function(name.clone()),
        Value::Array(items) => SanitizedValue::Array(
            items
                .items()
                .iter()
                .map(|item| match item {
                    Value::Function(_) => SanitizedValue::Undefined,
                    _ => sanitize(item, rules, seen),
                })
                .collect(),
        ),
        Value::Object(object) => {
            let mut cleaned = BTreeMap::new();
            for (key, member) in object.entries() {
                if !rules.keeps(&key, &member) {
                    continue;
                }
                let sanitized = sanitize(&member, rules, seen);
                let sanitized = if rules.redacts(&key) {
                    SanitizedValue::Redacted(Sensitive::new(Box::new(sanitized)))
                } else {
                    sanitized
                };
                cleaned.insert(key, sanitized);
            }

            if rules.follows_next() {
                if let Some(next) = object.get(NEXT_KEY).filter(Value::is_truthy) {
                    cleaned.insert(NEXT_KEY.to_string(), sanitize(&next, rules, seen));
                }
            }

            SanitizedValue::Object(cleaned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectRef;

    fn state_rules() -> SanitizeRules {
        SanitizeRules::for_kind(ValueKind::State, &InspectorConfig::default())
    }

    #[test]
    fn test_bookkeeping_field_dropped() {
        let state = Value::object([
            ("a", Value::from(1)),
            ("baseQueue", Value::object([("pending", Value::Null)])),
        ]);
        let out = Sanitizer::default().sanitize_state(&state);
        assert_eq!(
            out,
            SanitizedValue::object([("a", SanitizedValue::Number(1.0))])
        );
    }

    #[test]
    fn test_private_and_callable_members_dropped() {
        let props = Value::object([
            ("_secret", Value::from(1)),
            ("$$typeof", Value::from("element")),
            ("onClick", Value::function("handle")),
            ("key", Value::from("k1")),
            ("label", Value::from("Save")),
        ]);
        let out = Sanitizer::default().sanitize_props(&props);
        assert_eq!(
            out,
            SanitizedValue::object([("label", SanitizedValue::String("Save".into()))])
        );
    }

    #[test]
    fn test_primitives_pass_through() {
        let s = Sanitizer::default();
        assert_eq!(s.sanitize_state(&Value::from(7)), SanitizedValue::Number(7.0));
        assert_eq!(
            s.sanitize_state(&Value::function("f")),
            SanitizedValue::Function("f".into())
        );
    }

    #[test]
    fn test_key_blocked_for_props_kept_for_state() {
        let blob = Value::object([("type", Value::from("primary"))]);
        let s = Sanitizer::default();
        assert_eq!(s.sanitize_props(&blob), SanitizedValue::empty_object());
        assert_eq!(
            s.sanitize_state(&blob),
            SanitizedValue::object([("type", SanitizedValue::String("primary".into()))])
        );
    }

    #[test]
    fn test_next_chain_is_followed() {
        let hook2 = Value::object([
            ("memoizedState", Value::from("two")),
            ("next", Value::Null),
        ]);
        let hook1 = Value::object([
            ("memoizedState", Value::from(1)),
            ("deps", Value::array([])),
            ("next", hook2),
        ]);
        let out = Sanitizer::default().sanitize_state(&hook1);
        assert_eq!(
            out,
            SanitizedValue::object([
                ("memoizedState", SanitizedValue::Number(1.0)),
                (
                    "next",
                    SanitizedValue::object([(
                        "memoizedState",
                        SanitizedValue::String("two".into())
                    )])
                ),
            ])
        );
    }

    #[test]
    fn test_next_not_followed_for_props() {
        let props = Value::object([("next", Value::object([("x", Value::from(1))]))]);
        let out = Sanitizer::default().sanitize_props(&props);
        assert_eq!(
            out,
            SanitizedValue::object([(
                "next",
                SanitizedValue::object([("x", SanitizedValue::Number(1.0))])
            )])
        );
    }

    #[test]
    fn test_repeat_visit_retains_original() {
        let obj = ObjectRef::default();
        obj.insert("n", Value::from(1));
        obj.insert("self", Value::Object(obj.clone()));
        let out = sanitize(&Value::Object(obj.clone()), &state_rules(), &mut HashSet::new());

        match out.get("self") {
            Some(SanitizedValue::Retained(r)) => {
                assert_eq!(r.original().identity(), Some(obj.identity()))
            }
            other => panic!("expected retained original, got {:?}", other),
        }
    }

    #[test]
    fn test_sanitize_twice_with_shared_sub_object() {
        let shared = Value::object([("k", Value::from(1))]);
        let state = Value::object([("a", shared.clone()), ("b", shared)]);
        let sanitizer = Sanitizer::default();

        let once = sanitizer.sanitize_state(&state);
        let twice = sanitizer.sanitize_state(&Value::from(&once));
        assert!(matches!(once.get("b"), Some(SanitizedValue::Retained(_))));
        assert!(matches!(twice.get("b"), Some(SanitizedValue::Object(_))));
        assert_eq!(twice, once);
    }

    #[test]
    fn test_repeat_visit_marker_mode() {
        let config = InspectorConfig::default().with_cycle_mode(CycleMode::Marker);
        let rules = SanitizeRules::for_kind(ValueKind::State, &config);
        let obj = ObjectRef::default();
        obj.insert("self", Value::Object(obj.clone()));
        let out = sanitize(&Value::Object(obj), &rules, &mut HashSet::new());
        assert_eq!(out.get("self"), Some(&SanitizedValue::Cyclic));
    }

    #[test]
    fn test_array_holes_preserve_indices() {
        let state = Value::array([Value::from(1), Value::function("f"), Value::from(3)]);
        let out = Sanitizer::default().sanitize_state(&state);
        assert_eq!(
            out,
            SanitizedValue::Array(vec![
                SanitizedValue::Number(1.0),
                SanitizedValue::Undefined,
                SanitizedValue::Number(3.0),
            ])
        );
    }

    #[test]
    fn test_redacted_keys_are_wrapped() {
        let mut config = InspectorConfig::default();
        config.redact_keys = vec!["password".to_string()];
        let out = Sanitizer::new(&config)
            .sanitize_props(&Value::object([("password", Value::from("hunter2"))]));
        match out.get("password") {
            Some(SanitizedValue::Redacted(inner)) => {
                assert_eq!(**inner.expose(), SanitizedValue::String("hunter2".into()))
            }
            other => panic!("expected redacted value, got {:?}", other),
        }
    }
}
