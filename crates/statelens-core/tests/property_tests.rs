//! Property-based tests for sanitization and diffing
//!
//! Inputs are generated as JSON documents, so they are acyclic by
//! construction. Shared sub-objects are introduced explicitly by placing one
//! decoded value under two keys.

use proptest::prelude::*;
use serde_json::{Map, Value as Json};
use statelens_core::diff::{compare_values, diff_trees, Divergence};
use statelens_core::model::{SanitizedValue, Snapshot, Value};
use statelens_core::Sanitizer;
use std::collections::BTreeSet;

/// Keys mixing ordinary names with private, blocklisted and chained ones
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z]{1,5}",
        1 => Just("_hidden".to_string()),
        1 => Just("deps".to_string()),
        1 => Just("next".to_string()),
        1 => Just("key".to_string()),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = Json> {
    prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        (-1000i64..1000).prop_map(Json::from),
        "[a-z ]{0,8}".prop_map(Json::String),
    ]
}

fn json_strategy() -> impl Strategy<Value = Json> {
    leaf_strategy().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Json::Array),
            prop::collection::btree_map(key_strategy(), inner, 0..5)
                .prop_map(|m| Json::Object(m.into_iter().collect::<Map<String, Json>>())),
        ]
    })
}

/// JSON whose keys the sanitizer never drops
fn plain_json_strategy() -> impl Strategy<Value = Json> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Json::Array),
            prop::collection::btree_map("v[a-z]{0,3}", inner, 0..4)
                .prop_map(|m| Json::Object(m.into_iter().collect::<Map<String, Json>>())),
        ]
    })
}

/// `{left: x, right: x}` with both members the same live container
fn shared_pair(json: &Json) -> Value {
    let shared = Value::from_json(json);
    Value::object([("left", shared.clone()), ("right", shared)])
}

fn object_strategy() -> impl Strategy<Value = Json> {
    prop::collection::btree_map(key_strategy(), json_strategy(), 0..5)
        .prop_map(|m| Json::Object(m.into_iter().collect()))
}

fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
    let node = (
        prop_oneof![Just("Panel"), Just("Button"), Just("List")],
        object_strategy(),
        object_strategy(),
    )
        .prop_map(|(name, state, props)| {
            Snapshot::named(
                name,
                SanitizedValue::from(state),
                SanitizedValue::from(props),
                vec![],
            )
        });
    node.prop_recursive(3, 16, 3, |inner| {
        (
            prop_oneof![Just("App"), Just("Panel")],
            object_strategy(),
            prop::collection::vec(inner, 0..3),
        )
            .prop_map(|(name, state, children)| {
                Snapshot::named(
                    name,
                    SanitizedValue::from(state),
                    SanitizedValue::empty_object(),
                    children,
                )
            })
    })
}

/// Key path of a difference note, with the side label normalized away
fn flagged(note: &str) -> String {
    let path = note.split(": ").next().unwrap_or_default();
    if note.ends_with("key missing in A") || note.ends_with("key missing in B") {
        format!("{} missing", path)
    } else {
        path.to_string()
    }
}

fn flagged_set(divergences: &[Divergence]) -> BTreeSet<String> {
    let mut set = BTreeSet::new();
    for divergence in divergences {
        match divergence {
            Divergence::ComponentMismatch { path, .. } => {
                set.insert(format!("{} component", path));
            }
            Divergence::Entry(entry) => {
                set.extend(entry.state_differences.iter().map(|n| flagged(n)));
                set.extend(entry.props_differences.iter().map(|n| flagged(n)));
            }
        }
    }
    set
}

proptest! {
    #[test]
    fn prop_sanitize_state_is_idempotent(json in json_strategy()) {
        let sanitizer = Sanitizer::default();
        let once = sanitizer.sanitize_state(&Value::from_json(&json));
        let twice = sanitizer.sanitize_state(&Value::from(&once));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_sanitize_props_is_idempotent(json in json_strategy()) {
        let sanitizer = Sanitizer::default();
        let once = sanitizer.sanitize_props(&Value::from_json(&json));
        let twice = sanitizer.sanitize_props(&Value::from(&once));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_sanitize_is_idempotent_with_shared_members(json in plain_json_strategy()) {
        let sanitizer = Sanitizer::default();
        let once = sanitizer.sanitize_state(&shared_pair(&json));
        let twice = sanitizer.sanitize_state(&Value::from(&once));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_shared_members_survive_a_saved_round_trip(json in plain_json_strategy()) {
        let state = Sanitizer::default().sanitize_state(&shared_pair(&json));
        let live = Snapshot::named("Panel", state, SanitizedValue::empty_object(), vec![]);
        let saved = Snapshot::from_json_str(&live.to_json_pretty().unwrap()).unwrap();
        prop_assert!(diff_trees(&live, &saved).is_empty());
    }

    #[test]
    fn prop_value_against_itself_has_no_differences(json in json_strategy()) {
        let value = SanitizedValue::from(json);
        prop_assert!(compare_values(&value, &value, ".state").is_empty());
    }

    #[test]
    fn prop_tree_against_itself_is_empty(tree in snapshot_strategy()) {
        prop_assert!(diff_trees(&tree, &tree).is_empty());
    }

    #[test]
    fn prop_diff_flags_same_keys_both_ways(a in snapshot_strategy(), b in snapshot_strategy()) {
        let ab = diff_trees(&a, &b);
        let ba = diff_trees(&b, &a);
        prop_assert_eq!(flagged_set(&ab), flagged_set(&ba));

        let count = |ds: &[Divergence], label: &str| {
            ds.iter()
                .filter_map(Divergence::as_entry)
                .flat_map(|e| e.state_differences.iter().chain(&e.props_differences))
                .filter(|n| n.ends_with(label))
                .count()
        };
        prop_assert_eq!(count(&ab, "missing in A"), count(&ba, "missing in B"));
        prop_assert_eq!(count(&ab, "missing in B"), count(&ba, "missing in A"));
    }
}
