// SPDX-License-Identifier: MIT

//! Tests for script resolution and the binary sniffer.

use std::collections::HashMap;
use std::path::PathBuf;

use super::*;
use crate::runtime::RuntimeError;
use crate::stream::Stream;

fn state_with_bin_path(bin: &str) -> WorkerState {
    let mut environ = HashMap::new();
    environ.insert("BIN_PATH".to_string(), bin.to_string());
    environ.insert("HOME".to_string(), "/nonexistent-home".to_string());
    WorkerState::new(
        environ,
        PathBuf::from("/"),
        Stream::memory(),
        Stream::memory(),
        Stream::memory(),
    )
}

#[test]
fn resolves_exact_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("tool.sh");
    std::fs::write(&script, "echo hi\n").expect("write");

    let state = state_with_bin_path("");
    let arg = script.display().to_string();
    assert_eq!(find_script_file(&state, &arg).expect("resolve"), script);
}

#[test]
fn resolves_path_with_sh_suffix_probe() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("tool.sh");
    std::fs::write(&script, "echo hi\n").expect("write");

    let state = state_with_bin_path("");
    let stem = dir.path().join("tool").display().to_string();
    assert_eq!(find_script_file(&state, &stem).expect("resolve"), script);
}

#[test]
fn resolves_name_from_bin_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("greet.sh"), "echo hi\n").expect("write");

    let state = state_with_bin_path(&dir.path().display().to_string());
    let resolved = find_script_file(&state, "greet").expect("resolve");
    assert_eq!(resolved, dir.path().join("greet.sh"));
}

#[test]
fn bin_path_entries_are_colon_separated() {
    let first = tempfile::tempdir().expect("tempdir");
    let second = tempfile::tempdir().expect("tempdir");
    std::fs::write(second.path().join("late.sh"), "echo hi\n").expect("write");

    let bin = format!("{}:{}", first.path().display(), second.path().display());
    let state = state_with_bin_path(&bin);
    let resolved = find_script_file(&state, "late").expect("resolve");
    assert_eq!(resolved, second.path().join("late.sh"));
}

#[test]
fn directory_only_match_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("proj.sh")).expect("mkdir");

    let state = state_with_bin_path(&dir.path().display().to_string());
    assert!(matches!(find_script_file(&state, "proj"), Err(RuntimeError::IsDirectory(_))));
}

#[test]
fn missing_command_is_not_found() {
    let state = state_with_bin_path("/nonexistent-bin-dir");
    assert!(matches!(
        find_script_file(&state, "definitely-not-a-command"),
        Err(RuntimeError::FileNotFound(_))
    ));
}

#[test]
fn all_script_names_lists_sh_files_and_escapes_spaces() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("one.sh"), "").expect("write");
    std::fs::write(dir.path().join("two words.sh"), "").expect("write");
    std::fs::write(dir.path().join("not-a-script.txt"), "").expect("write");

    let state = state_with_bin_path(&dir.path().display().to_string());
    let names = all_script_names(&state);
    assert!(names.contains(&"one.sh".to_string()));
    assert!(names.contains(&"two\\ words.sh".to_string()));
    assert!(!names.iter().any(|n| n.contains("not-a-script")));
}

#[test]
fn text_file_is_not_binary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("plain.sh");
    std::fs::write(&path, "echo hello\n\tindented\r\n").expect("write");
    assert!(!is_binary_file(&path).expect("sniff"));
}

#[yare::parameterized(
    high_byte = { &[b'h', b'i', 0xFF, b'\n'] },
    nul_byte = { &[b'h', 0x00, b'i'] },
    escape_byte = { &[0x1B, b'[', b'm'] },
)]
fn binary_content_is_detected(bytes: &[u8]) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("blob");
    std::fs::write(&path, bytes).expect("write");
    assert!(is_binary_file(&path).expect("sniff"));
}

#[test]
fn empty_file_is_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.sh");
    std::fs::write(&path, "").expect("write");
    assert!(!is_binary_file(&path).expect("sniff"));
}
