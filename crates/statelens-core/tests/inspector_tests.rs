#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{app_fixture, live_app};
use statelens_core::config::{DiffLookup, InspectorConfig};
use statelens_core::diff::render_human_summary;
use statelens_core::render::{BufferSink, StyleHint, ROOT_NOT_FOUND};
use statelens_core::model::Value;
use statelens_core::{load_fixture_str, ExErrorKind, Inspector, MemoryNode, Snapshot};

#[test]
fn test_two_session_comparison() {
    let inspector = Inspector::new(InspectorConfig::default().with_labels("ada", "bob"));
    let mine = inspector.extract(Some(&live_app(1))).unwrap();
    let theirs = inspector.extract(Some(&live_app(2))).unwrap();

    let divergences = inspector.compare(&mine, &theirs);
    let lines = inspector.render(Some(&mine), &divergences);

    let mut sink = BufferSink::new();
    inspector.deliver(&mut sink, &lines).unwrap();
    assert_eq!(
        sink.texts(),
        vec![
            "App",
            "├─ Header",
            "└─ Counter",
            r#"    ada: state={"count":1} props={"label":"Clicks"}"#,
            r#"    bob: state={"count":2} props={"label":"Clicks"}"#,
            "    state differences:",
            "    - /App.children[1].state.count: 1 !== 2",
            "    props differences: none",
        ]
    );
}

#[test]
fn test_saved_snapshot_compares_like_live_one() {
    let inspector = Inspector::default();
    let live = inspector.extract(Some(&live_app(5))).unwrap();
    let saved = Snapshot::from_json_str(&live.to_json_pretty().unwrap()).unwrap();

    assert!(inspector.compare(&live, &saved).is_empty());
    assert_eq!(live.digest(), saved.digest());
}

#[test]
fn test_report_summary_from_fixtures() {
    let inspector = Inspector::default();
    let a = load_fixture_str(&app_fixture(1)).unwrap();
    let b = load_fixture_str(&app_fixture(9)).unwrap();
    let report = inspector.report(
        &inspector.extract(a.as_ref()).unwrap(),
        &inspector.extract(b.as_ref()).unwrap(),
    );
    let summary = render_human_summary(&report);
    assert!(summary.contains("**Classification**: Changed"));
    assert!(summary.contains("/App.children[1].state.count: 1 !== 9"));
}

#[test]
fn test_null_fixture_renders_notice() {
    let inspector = Inspector::default();
    let root = load_fixture_str("null").unwrap();
    let lines = inspector.render(inspector.extract(root.as_ref()).as_ref(), &[]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, ROOT_NOT_FOUND);
    assert_eq!(lines[0].style, Some(StyleHint::Notice));
}

#[test]
fn test_live_render_falls_back_to_root() {
    let inspector = Inspector::default();
    let root = MemoryNode::component("Shell").with_children([MemoryNode::component("Page")]);
    let lines = inspector.render_live(Some(&root), None).unwrap();
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["App", "  └─ Page"]);
}

/// `List` with two `Item` children holding `{v: 1}` and `{v: last}`
fn live_list(last: i32) -> MemoryNode {
    let item =
        |v: i32| MemoryNode::component("Item").with_state(Value::object([("v", Value::from(v))]));
    MemoryNode::component("List").with_children([item(1), item(last)])
}

#[test]
fn test_diff_lookup_follows_config() {
    let annotated = |config: InspectorConfig| {
        let inspector = Inspector::new(config);
        let mine = inspector.extract(Some(&live_list(5))).unwrap();
        let theirs = inspector.extract(Some(&live_list(6))).unwrap();
        let lines = inspector.render(Some(&mine), &inspector.compare(&mine, &theirs));
        lines
            .iter()
            .filter(|l| l.payload.is_some())
            .map(|l| l.text.clone())
            .collect::<Vec<_>>()
    };

    assert_eq!(
        annotated(InspectorConfig::default()),
        vec!["├─ Item", "└─ Item"]
    );
    assert_eq!(
        annotated(InspectorConfig::default().with_diff_lookup(DiffLookup::Positional)),
        vec!["└─ Item"]
    );
}

#[test]
fn test_fragment_lists_members_of_component() {
    let inspector = Inspector::default();
    let root = live_app(1);

    let lines = inspector.fragment(Some(&root), "App").unwrap();
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["<Fragment />", "  └─ main"]);
    assert_eq!(lines[0].style, Some(StyleHint::Root));

    // Counter is a sibling, not on the first-child chain
    let err = inspector.fragment(Some(&root), "Counter").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_fragment_sibling_members_and_bare_marker() {
    let inspector = Inspector::default();
    let root = MemoryNode::component("App").with_children([
        MemoryNode::component("Header"),
        MemoryNode::component("Footer"),
    ]);

    let lines = inspector.fragment(Some(&root), "App").unwrap();
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["<Fragment />", "  ├─ Header", "  └─ Footer"]);

    let lines = inspector.fragment(Some(&MemoryNode::component("App")), "App").unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "<Fragment />");

    let err = inspector.fragment(None::<&MemoryNode>, "App").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}
