use statelens_core::model::{SanitizedValue, Snapshot, Value};
use statelens_core::MemoryNode;

/// Snapshot with the given state and empty props
#[allow(dead_code)]
pub fn snapshot(name: &str, state: SanitizedValue, children: Vec<Snapshot>) -> Snapshot {
    Snapshot::named(name, state, SanitizedValue::empty_object(), children)
}

/// Childless snapshot with empty state and props
#[allow(dead_code)]
pub fn leaf(name: &str) -> Snapshot {
    snapshot(name, SanitizedValue::empty_object(), vec![])
}

/// `Counter` snapshot with `{count: n}` state
#[allow(dead_code)]
pub fn counter(count: f64) -> Snapshot {
    snapshot(
        "Counter",
        SanitizedValue::object([("count", SanitizedValue::Number(count))]),
        vec![],
    )
}

/// Live `Counter` node with `{count: n}` state and a click handler prop
#[allow(dead_code)]
pub fn live_counter(count: i32) -> MemoryNode {
    MemoryNode::component("Counter")
        .with_state(Value::object([("count", Value::from(count))]))
        .with_props(Value::object([
            ("label", Value::from("Clicks")),
            ("onClick", Value::function("increment")),
        ]))
}

/// A small application tree:
///
/// ```text
/// <wrapper div#root>
///   App
///     <wrapper main>
///       Header
///       Counter
/// ```
#[allow(dead_code)]
pub fn live_app(count: i32) -> MemoryNode {
    MemoryNode::wrapper().with_host("div#root").with_children([
        MemoryNode::component("App").with_children([MemoryNode::wrapper()
            .with_host("main")
            .with_children([
                MemoryNode::component("Header")
                    .with_props(Value::object([("title", Value::from("Demo"))])),
                live_counter(count),
            ])]),
    ])
}

/// Fixture document equivalent to `live_app(count)`
#[allow(dead_code)]
pub fn app_fixture(count: i32) -> String {
    format!(
        r#"{{
  "host": "div#root",
  "children": [
    {{
      "name": "App",
      "children": [
        {{
          "host": "main",
          "children": [
            {{"name": "Header", "props": {{"title": "Demo"}}}},
            {{
              "name": "Counter",
              "state": {{"count": {count}}},
              "props": {{"label": "Clicks", "onClick": {{"$fn": "increment"}}}}
            }}
          ]
        }}
      ]
    }}
  ]
}}"#
    )
}
