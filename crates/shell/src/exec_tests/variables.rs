// SPDX-License-Identifier: MIT

//! Environment semantics: assignment persistence, prefix assignments,
//! laziness within a line.

use super::Sandbox;

#[test]
fn assignment_then_use_on_one_line() {
    // The next sequence is expanded only after the assignment ran.
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("A=42; echo $A"), "42\n");
    assert_eq!(sandbox.rt.env_get("A").as_deref(), Some("42"));
}

#[test]
fn assignment_persists_across_lines_at_top_level() {
    let sandbox = Sandbox::new();
    sandbox.run("GREETING=hello");
    assert_eq!(sandbox.run("echo $GREETING"), "hello\n");
}

#[test]
fn prefix_assignment_is_not_persisted() {
    // `A=42 echo $A` prints a blank line: $A expands in the parent frame
    // (where A is unset) before dispatch, and A does not survive the
    // command.
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("A=42 echo $A"), "\n");
    assert!(sandbox.rt.env_get("A").is_none());
}

#[test]
fn prefix_assignment_reaches_the_command_image() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("A=42 printenv A"), "42\n");
    assert!(sandbox.rt.env_get("A").is_none());
}

#[test]
fn reassignment_overwrites() {
    let sandbox = Sandbox::new();
    sandbox.run("V=first");
    sandbox.run("V=second");
    assert_eq!(sandbox.run("echo $V"), "second\n");
}

#[test]
fn multiple_assignments_on_one_command() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("A=1 B=2 printenv B"), "2\n");
}

#[test]
fn assignment_value_expands_previous_variables() {
    let sandbox = Sandbox::new();
    sandbox.run("BASE=/usr");
    sandbox.run("FULL=$BASE/bin");
    assert_eq!(sandbox.run("echo $FULL"), "/usr/bin\n");
}

#[test]
fn alias_definitions_persist_at_top_level() {
    let sandbox = Sandbox::new();
    sandbox.run("alias greet='echo hi there'");
    assert_eq!(sandbox.run("greet friend"), "hi there friend\n");
}

#[test]
fn aliases_list_in_definition_order() {
    let sandbox = Sandbox::new();
    sandbox.run("alias z='echo z'");
    sandbox.run("alias a='echo a'");
    assert_eq!(sandbox.run("alias"), "alias z='echo z'\nalias a='echo a'\n");
}

#[test]
fn dollar_dollar_is_a_worker_id() {
    let sandbox = Sandbox::new();
    let first = sandbox.run("echo $$");
    let second = sandbox.run("echo $$");
    assert_ne!(first.trim(), "");
    // Each run is a fresh worker.
    assert_ne!(first, second);
}

#[test]
fn unknown_variable_is_empty() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.run("echo [$NOPE_NOT_SET]"), "[]\n");
}

#[test]
fn bad_substitution_is_reported() {
    let sandbox = Sandbox::new();
    let output = sandbox.run("echo ${UNTERMINATED");
    assert!(output.starts_with("stash: "));
    assert!(output.contains("bad substitution"));
}
