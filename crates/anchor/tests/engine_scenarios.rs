//! End-to-end engine behavior over in-memory pages and a hermetic store.

use anchor::{Engine, EngineConfig, MARK_CLASS};
use bus::{Bus, EngineEvent};
use chrono::Local;
use dom::fixtures::{doc, el, text, text_node_id};
use dom::{Document, TextRange};
use serde_json::json;
use store::{DEFAULT_COLOR, Highlight, KeyValue, MemoryStore, highlights, settings};

fn engine_with(kv: MemoryStore) -> (Engine<MemoryStore>, Bus) {
    let bus = Bus::new();
    let engine = Engine::new(kv, bus.evt_tx.clone(), EngineConfig::default());
    (engine, bus)
}

fn badge_counts(bus: &Bus) -> Vec<usize> {
    bus.evt_rx
        .try_iter()
        .filter_map(|event| match event {
            EngineEvent::BadgeUpdate { count } => Some(count),
            _ => None,
        })
        .collect()
}

fn seeded(records: &[(&str, &str)]) -> MemoryStore {
    let kv = MemoryStore::new();
    for (text, url) in records {
        highlights::append(&kv, Highlight::new(*text, *url, DEFAULT_COLOR, Local::now())).unwrap();
    }
    kv
}

fn select_whole_node(page: &mut Document, needle: &str) {
    let id = text_node_id(page, needle).unwrap();
    page.select(TextRange::new(id, 0, id, needle.len()));
}

#[test]
fn capture_appends_one_descriptor_and_reports_the_badge() {
    let mut page = doc(
        "https://ex.com/p1",
        vec![el("p", vec![text("say hello world today")])],
    );
    let (mut engine, bus) = engine_with(MemoryStore::new());

    let id = text_node_id(&page, "say hello world today").unwrap();
    page.select(TextRange::new(id, 4, id, 15));
    let captured = engine.capture(&mut page).unwrap();

    assert_eq!(captured.text, "hello world");
    assert_eq!(captured.url, "https://ex.com/p1");
    assert_eq!(captured.color, DEFAULT_COLOR);
    assert_eq!(captured.note, "");

    let stored = highlights::all(engine.store()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0], captured);
    assert_eq!(badge_counts(&bus), vec![1]);

    // the native selection clears so only the wrapper shows
    assert!(page.selection().is_none());
    assert_eq!(page.marked_elements(MARK_CLASS).len(), 1);
}

#[test]
fn capture_trims_whitespace_but_wraps_the_raw_range() {
    let mut page = doc("https://ex.com/p1", vec![el("p", vec![text("  padded  ")])]);
    let (mut engine, _bus) = engine_with(MemoryStore::new());

    select_whole_node(&mut page, "  padded  ");
    let captured = engine.capture(&mut page).unwrap();
    assert_eq!(captured.text, "padded");
    assert_eq!(page.marked_elements(MARK_CLASS).len(), 1);
}

#[test]
fn whitespace_only_selections_never_persist() {
    let mut page = doc("https://ex.com/p1", vec![el("p", vec![text("   ")])]);
    let (mut engine, bus) = engine_with(MemoryStore::new());

    select_whole_node(&mut page, "   ");
    assert!(engine.capture(&mut page).is_none());
    assert!(highlights::all(engine.store()).unwrap().is_empty());
    assert!(badge_counts(&bus).is_empty());
    // selection stays: nothing was wrapped in its place
    assert!(page.selection().is_some());
}

#[test]
fn capture_with_nothing_wrappable_leaves_no_trace() {
    let mut page = doc(
        "https://ex.com/p1",
        vec![el("p", vec![text("taken already")])],
    );
    let (mut engine, bus) = engine_with(MemoryStore::new());

    // first capture wraps the passage
    select_whole_node(&mut page, "taken already");
    engine.capture(&mut page).unwrap();
    let _ = badge_counts(&bus);

    // selecting the now-wrapped text again cannot wrap anything
    let inner = text_node_id(&page, "taken already").unwrap();
    page.select(TextRange::new(inner, 0, inner, 5));
    assert!(engine.capture(&mut page).is_none());

    assert_eq!(highlights::all(engine.store()).unwrap().len(), 1);
    assert!(badge_counts(&bus).is_empty());
    assert!(page.selection().is_some());
}

#[test]
fn partial_wrap_is_enough_to_persist() {
    let mut page = doc(
        "https://ex.com/p1",
        vec![el("p", vec![text("keep "), el("b", vec![text("going")])])],
    );
    let (mut engine, _bus) = engine_with(MemoryStore::new());

    // wrap "going" first so half of the next selection is taken
    select_whole_node(&mut page, "going");
    engine.capture(&mut page).unwrap();

    let a = text_node_id(&page, "keep ").unwrap();
    let b = text_node_id(&page, "going").unwrap();
    page.select(TextRange::new(a, 0, b, 5));
    let captured = engine.capture(&mut page).unwrap();

    assert_eq!(captured.text, "keep going");
    assert_eq!(highlights::all(engine.store()).unwrap().len(), 2);
}

#[test]
fn restore_is_scoped_to_the_exact_url() {
    let kv = seeded(&[
        ("alpha passage", "https://a.test/x"),
        ("beta passage", "https://b.test/y"),
    ]);
    let (mut engine, bus) = engine_with(kv);

    let mut page = doc(
        "https://a.test/x",
        vec![
            el("p", vec![text("alpha passage")]),
            el("p", vec![text("beta passage")]),
        ],
    );
    let count = engine.restore(&mut page);

    assert_eq!(count, 1);
    assert_eq!(badge_counts(&bus), vec![1]);
    let wrappers = page.marked_elements(MARK_CLASS);
    assert_eq!(wrappers.len(), 1);
    let wrapped = page.find(wrappers[0]).unwrap();
    assert_eq!(wrapped.children().unwrap()[0].text(), Some("alpha passage"));
}

#[test]
fn badge_counts_stored_knowledge_not_rendering_success() {
    let kv = seeded(&[
        ("foo", "https://ex.com/p1"),
        ("bar", "https://ex.com/p1"),
    ]);
    let (mut engine, bus) = engine_with(kv);

    // "foo" is gone from the page content
    let mut page = doc("https://ex.com/p1", vec![el("p", vec![text("only bar here")])]);
    let count = engine.restore(&mut page);

    assert_eq!(count, 2);
    assert_eq!(badge_counts(&bus), vec![2]);
    assert_eq!(page.marked_elements(MARK_CLASS).len(), 1);
}

#[test]
fn restore_twice_produces_the_same_wrapper_set() {
    let kv = seeded(&[("echo", "https://ex.com/p1")]);
    let (mut engine, _bus) = engine_with(kv);

    // the passage occurs twice; only the first occurrence may ever wrap
    let mut page = doc(
        "https://ex.com/p1",
        vec![
            el("p", vec![text("echo one")]),
            el("p", vec![text("echo two")]),
        ],
    );
    engine.restore(&mut page);
    let after_first = page.marked_elements(MARK_CLASS);
    engine.restore(&mut page);
    let after_second = page.marked_elements(MARK_CLASS);

    assert_eq!(after_first.len(), 1);
    assert_eq!(after_first, after_second);
}

#[test]
fn restore_preserves_scroll_and_selection() {
    let kv = seeded(&[("anchor me", "https://ex.com/p1")]);
    let (mut engine, _bus) = engine_with(kv);

    let mut page = doc(
        "https://ex.com/p1",
        vec![
            el("p", vec![text("anchor me")]),
            el("p", vec![text("reader was here")]),
        ],
    );
    page.set_scroll(0.0, 1240.5);
    select_whole_node(&mut page, "reader was here");
    let held = *page.selection().unwrap();

    engine.restore(&mut page);

    assert_eq!(page.scroll(), (0.0, 1240.5));
    assert_eq!(page.selection(), Some(&held));
    assert_eq!(page.marked_elements(MARK_CLASS).len(), 1);
}

#[test]
fn paused_engine_does_nothing_at_all() {
    let kv = seeded(&[("dormant", "https://ex.com/p1")]);
    kv.set(settings::PAUSED_KEY, json!(true)).unwrap();
    let (mut engine, bus) = engine_with(kv);

    let mut page = doc("https://ex.com/p1", vec![el("p", vec![text("dormant")])]);
    assert_eq!(engine.restore(&mut page), 0);
    assert!(page.marked_elements(MARK_CLASS).is_empty());

    select_whole_node(&mut page, "dormant");
    assert!(engine.capture(&mut page).is_none());
    assert!(page.marked_elements(MARK_CLASS).is_empty());
    assert!(badge_counts(&bus).is_empty());
}

#[test]
fn user_color_applies_to_new_captures() {
    let kv = MemoryStore::new();
    kv.set(settings::COLOR_KEY, json!("#88ff00")).unwrap();
    let (mut engine, _bus) = engine_with(kv);

    let mut page = doc("https://ex.com/p1", vec![el("p", vec![text("tinted")])]);
    select_whole_node(&mut page, "tinted");
    let captured = engine.capture(&mut page).unwrap();
    assert_eq!(captured.color, "#88ff00");
}

#[test]
fn store_changes_are_forwarded_to_the_bus() {
    let (mut engine, bus) = engine_with(MemoryStore::new());
    let mut page = doc("https://ex.com/p1", vec![el("p", vec![text("watched")])]);

    select_whole_node(&mut page, "watched");
    engine.capture(&mut page).unwrap();
    engine.pump_store_changes();

    let keys: Vec<String> = bus
        .evt_rx
        .try_iter()
        .filter_map(|event| match event {
            EngineEvent::StoreChanged { key } => Some(key),
            _ => None,
        })
        .collect();
    assert_eq!(keys, vec![highlights::HIGHLIGHTS_KEY.to_string()]);
}
