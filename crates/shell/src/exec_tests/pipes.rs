// SPDX-License-Identifier: MIT

//! Pipeline wiring between stages.

use super::Sandbox;

#[test]
fn echo_through_cat() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("echo hello | cat"), "hello\n");
    assert_eq!(sandbox.rt.last_return_value(), 0);
}

#[test]
fn three_stage_pipeline() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("echo deep | cat | cat"), "deep\n");
}

#[test]
fn middle_stages_do_not_reach_the_terminal() {
    let sandbox = Sandbox::new();
    // Only the last stage writes to the terminal.
    assert_eq!(sandbox.run("echo silent | true"), "");
}

#[test]
fn failing_stage_breaks_the_pipeline() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("false | echo not-reached"), "");
    assert_eq!(sandbox.rt.last_return_value(), 1);
}

#[test]
fn pipeline_break_does_not_stop_next_sequence() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("false | echo skipped; echo ran"), "ran\n");
}

#[test]
fn file_sink_stage_feeds_empty_input_to_next() {
    let sandbox = Sandbox::new();
    let out = sandbox.path("sink.txt");
    assert_eq!(sandbox.run(&format!("echo hidden > {out} | cat")), "");
    let written = std::fs::read_to_string(sandbox.path("sink.txt")).expect("read sink");
    assert_eq!(written, "hidden\n");
}

#[test]
fn prefix_assignment_does_not_cross_pipe_stages() {
    let sandbox = Sandbox::new();
    // A is visible to the first stage's image only.
    assert_eq!(sandbox.run("A=42 true | printenv A"), "");
    assert_eq!(sandbox.rt.last_return_value(), 1);
}

#[test]
fn pure_assignment_mid_pipe_is_a_no_op_stage() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("echo x | B=1 | cat"), "");
    assert!(sandbox.rt.env_get("B").is_none());
}
