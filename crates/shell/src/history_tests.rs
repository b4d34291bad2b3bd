// SPDX-License-Identifier: MIT

//! Tests for the history store.

use super::*;

fn history_with(entries: &[&str]) -> History {
    let mut h = History::new(30, false);
    for e in entries {
        h.add(e);
    }
    h
}

#[test]
fn newest_entry_is_first() {
    let h = history_with(&["first", "second", "third"]);
    assert_eq!(h.interactive_entries()[0], "third");
    assert_eq!(h.len(), 3);
}

#[test]
fn blank_lines_are_not_inserted() {
    let mut h = history_with(&["cmd"]);
    h.add("   ");
    h.add("");
    assert_eq!(h.len(), 1);
}

#[test]
fn consecutive_duplicates_are_not_inserted() {
    let mut h = history_with(&["cmd"]);
    h.add("cmd");
    assert_eq!(h.len(), 1);
    h.add("other");
    h.add("cmd");
    assert_eq!(h.len(), 3);
}

#[test]
fn entries_are_trimmed() {
    let mut h = History::new(30, false);
    h.add("  spaced out  ");
    assert_eq!(h.interactive_entries()[0], "spaced out");
}

#[test]
fn bounded_at_max() {
    let mut h = History::new(3, false);
    for i in 0..10 {
        h.add(&format!("cmd{i}"));
    }
    assert_eq!(h.len(), 3);
    assert_eq!(h.interactive_entries()[0], "cmd9");
}

#[yare::parameterized(
    bang = { "!", "charlie" },
    bang_bang = { "!!", "charlie" },
    by_index_oldest = { "!0", "alpha" },
    by_index_middle = { "!1", "bravo" },
    by_prefix = { "!al", "alpha" },
    by_prefix_latest_match = { "!ch", "charlie" },
)]
fn search_resolves(tok: &str, expected: &str) {
    let h = history_with(&["alpha", "bravo", "charlie"]);
    assert_eq!(h.search(tok).expect("resolve"), expected);
}

#[yare::parameterized(
    missing_prefix = { "!zz" },
    out_of_range_index = { "!9" },
)]
fn search_event_not_found(tok: &str) {
    let h = history_with(&["alpha"]);
    assert!(matches!(h.search(tok), Err(RuntimeError::EventNotFound { .. })));
}

#[test]
fn search_on_empty_history_fails() {
    let h = History::new(30, false);
    assert!(matches!(h.search("!"), Err(RuntimeError::EventNotFound { .. })));
}

#[test]
fn swap_hides_interactive_entries() {
    let mut h = history_with(&["visible"]);
    h.swap();
    assert!(h.is_empty());
    assert_eq!(h.interactive_entries(), ["visible".to_string()]);
    h.add("script-local");
    h.swap();
    assert_eq!(h.interactive_entries()[0], "visible");
}

#[test]
fn up_walks_from_newest_to_oldest() {
    let mut h = history_with(&["one", "two"]);
    assert_eq!(h.up("").as_deref(), Some("two"));
    assert_eq!(h.up("").as_deref(), Some("one"));
    // Walking past the oldest stays put.
    assert_eq!(h.up(""), None);
}

#[test]
fn down_restores_live_template() {
    let mut h = history_with(&["one", "two"]);
    assert_eq!(h.up("draft").as_deref(), Some("two"));
    assert_eq!(h.down().as_deref(), Some("draft"));
    assert_eq!(h.down(), None);
}

#[test]
fn ipython_style_up_jumps_to_matching_prefix() {
    let mut h = History::new(30, true);
    h.add("ls -la");
    h.add("echo hi");
    h.add("git status");
    assert_eq!(h.up("ls").as_deref(), Some("ls -la"));
}

#[test]
fn add_resets_navigation() {
    let mut h = history_with(&["one"]);
    let _ = h.up("");
    h.add("two");
    assert_eq!(h.up("").as_deref(), Some("two"));
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("history");

    let h = history_with(&["first", "second"]);
    h.save(&path).expect("save");

    let text = std::fs::read_to_string(&path).expect("read");
    assert_eq!(text, "first\nsecond");

    let mut loaded = History::new(30, false);
    loaded.load(&path);
    assert_eq!(loaded.interactive_entries(), ["second".to_string(), "first".to_string()]);
}

#[test]
fn load_missing_file_is_empty() {
    let mut h = History::new(30, false);
    h.load(std::path::Path::new("/nonexistent/history"));
    assert!(h.is_empty());
}
