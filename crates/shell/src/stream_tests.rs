// SPDX-License-Identifier: MIT

//! Tests for stream handles and the in-memory buffer.

use std::io::Read;

use super::*;
use crate::terminal::MemTerminal;

#[test]
fn membuf_lines_round_trip() {
    let mut buf = MemBuf::default();
    buf.write_str("one\ntwo\n");
    assert_eq!(buf.read_line(), Some("one".into()));
    assert_eq!(buf.read_line(), Some("two".into()));
    assert_eq!(buf.read_line(), None);
}

#[test]
fn membuf_last_line_without_newline() {
    let mut buf = MemBuf::default();
    buf.write_str("partial");
    assert_eq!(buf.read_line(), Some("partial".into()));
    assert_eq!(buf.read_line(), None);
}

#[test]
fn membuf_rewind_resets_cursor() {
    let mut buf = MemBuf::default();
    buf.write_str("a\n");
    assert_eq!(buf.read_line(), Some("a".into()));
    buf.rewind();
    assert_eq!(buf.read_line(), Some("a".into()));
}

#[test]
fn memory_stream_is_shared_between_clones() {
    let s = Stream::memory();
    let clone = s.clone();
    s.write_str("hello\n").expect("write");
    assert_eq!(clone.read_line(), Some("hello".into()));
}

#[test]
fn memory_stream_capture_ignores_cursor() {
    let s = Stream::memory();
    s.write_str("x\ny\n").expect("write");
    let _ = s.read_line();
    assert_eq!(s.capture().as_deref(), Some("x\ny\n"));
}

#[test]
fn terminal_stream_writes_to_terminal() {
    let term = MemTerminal::new();
    let s = Stream::Terminal(term.clone());
    s.write_str("out\n").expect("write");
    assert_eq!(term.output(), "out\n");
}

#[test]
fn terminal_stream_reads_queued_lines() {
    let term = MemTerminal::with_input(&["first", "second"]);
    let s = Stream::Terminal(term);
    assert_eq!(s.read_line(), Some("first".into()));
    assert_eq!(s.read_line(), Some("second".into()));
    assert_eq!(s.read_line(), None);
}

#[test]
fn file_stream_is_write_only_for_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.txt");
    let file = std::fs::File::create(&path).expect("create");
    let s = Stream::from_file(file);
    s.write_str("written\n").expect("write");
    assert_eq!(s.read_line(), None);
    drop(s);

    let mut back = String::new();
    std::fs::File::open(&path)
        .expect("open")
        .read_to_string(&mut back)
        .expect("read");
    assert_eq!(back, "written\n");
}

#[test]
fn read_to_end_drains_remaining() {
    let s = Stream::memory();
    s.write_str("a\nb\nc\n").expect("write");
    let _ = s.read_line();
    assert_eq!(s.read_to_end(), "b\nc\n");
}
