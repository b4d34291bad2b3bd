// SPDX-License-Identifier: MIT

//! Background sequences: detachment and state isolation.

use std::time::{Duration, Instant};

use super::Sandbox;

/// Give a detached worker a moment to finish.
fn settle() {
    std::thread::sleep(Duration::from_millis(50));
}

#[test]
fn background_output_skips_the_terminal() {
    let sandbox = Sandbox::new();
    // The sequence runs on a detached worker whose output goes to the
    // process-level streams, never the interactive one.
    let output = sandbox.run("echo backgrounded &");
    settle();
    assert_eq!(output, "");
}

#[test]
fn background_sequence_does_not_block_the_line() {
    let sandbox = Sandbox::new();
    let started = Instant::now();
    let output = sandbox.run("true & echo prompt-back");
    settle();
    assert_eq!(output, "prompt-back\n");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn background_state_never_returns() {
    let sandbox = Sandbox::new();
    let marker = sandbox.path("marker.txt");
    sandbox.run(&format!("BG_VAR=1 true > {marker} &"));
    settle();
    assert!(sandbox.rt.env_get("BG_VAR").is_none());
    // The detached worker did run: its redirect target exists.
    assert!(std::path::Path::new(&marker).exists());
}
