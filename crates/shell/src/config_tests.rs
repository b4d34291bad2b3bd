// SPDX-License-Identifier: MIT

//! Tests for configuration loading.

use super::*;

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.system.rcfile, ".stashrc");
    assert_eq!(config.system.historyfile, ".stash_history");
    assert!(!config.system.traceback);
    assert!(!config.system.ipython_style_history_search);
    assert_eq!(config.display.history_max, 30);
    assert_eq!(config.display.buffer_max, 150);
    assert_eq!(config.display.auto_completion_max, 30);
}

#[test]
fn parses_full_file() {
    let config = Config::parse_str(
        r#"
[system]
rcfile = "rc.local"
historyfile = "hist"
traceback = true
ipython_style_history_search = true

[display]
history_max = 50
buffer_max = 500
auto_completion_max = 10
"#,
        "test",
    )
    .expect("parse");
    assert_eq!(config.system.rcfile, "rc.local");
    assert!(config.system.traceback);
    assert!(config.system.ipython_style_history_search);
    assert_eq!(config.display.history_max, 50);
    assert_eq!(config.display.auto_completion_max, 10);
}

#[test]
fn partial_sections_use_defaults() {
    let config = Config::parse_str("[display]\nhistory_max = 5\n", "test").expect("parse");
    assert_eq!(config.display.history_max, 5);
    assert_eq!(config.display.buffer_max, 150);
    assert_eq!(config.system.rcfile, ".stashrc");
}

#[test]
fn empty_file_is_all_defaults() {
    let config = Config::parse_str("", "test").expect("parse");
    assert_eq!(config, Config::default());
}

#[test]
fn unknown_keys_are_rejected() {
    let err = Config::parse_str("[system]\nno_such_key = 1\n", "test");
    assert!(matches!(err, Err(ConfigError::Parse { .. })));
}

#[test]
fn load_or_default_on_missing_file() {
    let config = Config::load_or_default(std::path::Path::new("/nonexistent/stash.toml"));
    assert_eq!(config, Config::default());
}

#[test]
fn load_reads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[display]\nhistory_max = 7\n").expect("write");
    let config = Config::load(&path).expect("load");
    assert_eq!(config.display.history_max, 7);
}
