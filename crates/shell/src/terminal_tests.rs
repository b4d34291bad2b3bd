// SPDX-License-Identifier: MIT

//! Tests for the in-memory terminal.

use super::*;

#[test]
fn records_writes() {
    let term = MemTerminal::new();
    term.write("hello ");
    term.write("world\n");
    assert_eq!(term.output(), "hello world\n");
}

#[test]
fn prefix_writes_are_marked() {
    let term = MemTerminal::new();
    term.write_with_prefix("oops: command not found\n");
    assert_eq!(term.output(), "stash: oops: command not found\n");
}

#[test]
fn feeds_scripted_input() {
    let term = MemTerminal::with_input(&["echo hi"]);
    assert!(!term.input_did_eof());
    assert_eq!(term.read_line(), Some("echo hi".into()));
    assert_eq!(term.read_line(), None);
    assert!(term.input_did_eof());
}

#[test]
fn tracks_input_line() {
    let term = MemTerminal::new();
    term.set_inp_line("partial cmd", Some(7));
    assert_eq!(term.inp_line(), "partial cmd");
    assert_eq!(term.read_inp_line(), "partial cmd");
    term.new_inp_line("");
    assert_eq!(term.inp_line(), "");
}
