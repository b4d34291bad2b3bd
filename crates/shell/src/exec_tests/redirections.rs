// SPDX-License-Identifier: MIT

//! Redirect handling: truncate, append, stderr coverage, sentinels.

use super::Sandbox;

#[test]
fn truncate_writes_file() {
    let sandbox = Sandbox::new();
    let out = sandbox.path("out.txt");
    assert_eq!(sandbox.run(&format!("echo hello > {out}")), "");
    assert_eq!(std::fs::read_to_string(&out).expect("read"), "hello\n");
}

#[test]
fn truncate_replaces_existing_content() {
    let sandbox = Sandbox::new();
    let out = sandbox.path("out.txt");
    sandbox.run(&format!("echo first > {out}"));
    sandbox.run(&format!("echo second > {out}"));
    assert_eq!(std::fs::read_to_string(&out).expect("read"), "second\n");
}

#[test]
fn append_accumulates() {
    let sandbox = Sandbox::new();
    let out = sandbox.path("log.txt");
    sandbox.run(&format!("echo one >> {out}"));
    sandbox.run(&format!("echo two >> {out}"));
    assert_eq!(std::fs::read_to_string(&out).expect("read"), "one\ntwo\n");
}

#[test]
fn stderr_goes_to_the_same_target() {
    // Stdout redirect covers stderr too; a deliberate POSIX deviation.
    let sandbox = Sandbox::new();
    let out = sandbox.path("both.txt");
    sandbox.run(&format!("cat /no/such/file > {out}"));
    let written = std::fs::read_to_string(&out).expect("read");
    assert!(written.starts_with("cat: /no/such/file"));
}

#[test]
fn redirect_filename_from_variable() {
    let sandbox = Sandbox::new();
    let out = sandbox.path("var.txt");
    sandbox.run(&format!("OUT={out}"));
    sandbox.run("echo routed > $OUT");
    assert_eq!(std::fs::read_to_string(&out).expect("read"), "routed\n");
}

#[test]
fn empty_redirect_filename_is_reported() {
    let sandbox = Sandbox::new();
    let output = sandbox.run("echo hi > $UNSET_VARIABLE_Q");
    assert_eq!(output, "stash: ambiguous redirect\n");
}

#[test]
fn process_sentinel_bypasses_the_terminal() {
    let sandbox = Sandbox::new();
    // `&3` routes to the process-level streams, so the in-memory terminal
    // sees nothing.
    assert_eq!(sandbox.run("echo escaped > '&3'"), "");
    assert_eq!(sandbox.rt.last_return_value(), 0);
}

#[test]
fn unwritable_target_reports_io_error() {
    let sandbox = Sandbox::new();
    let output = sandbox.run("echo hi > /no/such/dir/out.txt");
    assert!(output.starts_with("stash: /no/such/dir/out.txt:"));
}
