// SPDX-License-Identifier: MIT

//! Basic execution: builtins, return values, sequencing.

use super::Sandbox;

#[test]
fn echo_writes_to_terminal() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("echo hello"), "hello\n");
    assert_eq!(sandbox.rt.last_return_value(), 0);
}

#[test]
fn empty_line_is_a_no_op() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("   "), "");
    assert!(sandbox.rt.history_entries().is_empty());
}

#[test]
fn comment_line_is_a_no_op() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("# just a note"), "");
}

#[test]
fn semicolon_sequences_run_in_order() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("echo one; echo two; echo three"), "one\ntwo\nthree\n");
}

#[test]
fn failing_sequence_does_not_stop_later_ones() {
    let sandbox = Sandbox::new();
    let output = sandbox.run("false; echo still-here");
    assert_eq!(output, "still-here\n");
}

#[test]
fn return_value_tracks_last_command() {
    let sandbox = Sandbox::new();
    sandbox.run("false");
    assert_eq!(sandbox.rt.last_return_value(), 1);
    sandbox.run("true");
    assert_eq!(sandbox.rt.last_return_value(), 0);
}

#[test]
fn question_mark_reflects_previous_line() {
    let sandbox = Sandbox::new();
    sandbox.run("false");
    assert_eq!(sandbox.run("echo $?"), "1\n");
}

#[test]
fn single_quoted_whitespace_is_one_arg() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("echo 'a  b'"), "a  b\n");
}

#[test]
fn worker_stack_unwinds_after_run() {
    let sandbox = Sandbox::new();
    let before = sandbox.rt.cwd();
    sandbox.run("echo hi");
    sandbox.run("definitely-not-a-command-xyz");
    assert_eq!(sandbox.rt.cwd(), before);
}

#[test]
fn escaped_cmd_word_bypasses_alias() {
    let sandbox = Sandbox::new();
    sandbox.run("alias echo='echo aliased'");
    assert_eq!(sandbox.run("echo hi"), "aliased hi\n");
    assert_eq!(sandbox.run(r"\echo hi"), "hi\n");
}
