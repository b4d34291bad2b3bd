// SPDX-License-Identifier: MIT

//! Error surfacing and cancellation.

use std::time::Duration;

use super::Sandbox;
use crate::runtime::RunOptions;

fn no_prompt() -> RunOptions {
    RunOptions { add_new_inp_line: Some(false), ..RunOptions::default() }
}

#[test]
fn parse_error_reports_offset_and_remainder() {
    let sandbox = Sandbox::new();
    let output = sandbox.run("ok; ; bad");
    assert_eq!(output, "stash: syntax error: at char 4: expected a command in: ; bad\n");
}

#[test]
fn lone_punctuator_is_a_parse_error() {
    let sandbox = Sandbox::new();
    assert!(sandbox.run(";").starts_with("stash: syntax error"));
    assert!(sandbox.run("&").starts_with("stash: syntax error"));
}

#[test]
fn unterminated_quote_is_a_parse_error() {
    let sandbox = Sandbox::new();
    let output = sandbox.run("echo 'oops");
    assert!(output.starts_with("stash: syntax error: at char 5: unterminated single quote"));
}

#[test]
fn event_not_found_is_reported() {
    let sandbox = Sandbox::new();
    let output = sandbox.run("!nothing-matches");
    assert_eq!(output, "stash: !nothing-matches: event not found\n");
}

#[test]
fn parse_error_aborts_remaining_lines_of_the_run() {
    let sandbox = Sandbox::new();
    sandbox
        .rt
        .run(
            vec!["echo one".into(), "echo 'broken".into(), "echo three".into()],
            no_prompt(),
        )
        .join();
    let output = sandbox.term.output();
    assert!(output.starts_with("one\n"));
    assert!(output.contains("syntax error"));
    assert!(!output.contains("three"));
}

#[test]
fn cancel_aborts_the_line_and_clears() {
    let sandbox = Sandbox::new();
    sandbox.rt.cancel();
    let output = sandbox.run("echo should-not-run");
    assert_eq!(output, "^C\nstash: interrupted\n");
    // The flag cleared on unwind; the next line runs normally.
    assert_eq!(sandbox.run("echo alive"), "alive\n");
}

#[test]
fn finished_worker_is_not_alive() {
    let sandbox = Sandbox::new();
    let worker = sandbox.rt.run_line("echo done");
    worker.join();
    assert!(!worker.is_alive());
    assert!(worker.wait_timeout(Duration::from_millis(10)));
    assert!(!worker.abandon_after(Duration::from_millis(10)));
}

