// SPDX-License-Identifier: MIT

//! The literal end-to-end scenarios.

use similar_asserts::assert_eq;

use super::prelude::Shell;

/// Scenario 1: `echo hello | cat`.
#[test]
fn echo_through_cat() {
    let shell = Shell::new();
    assert_eq!(shell.run("echo hello | cat"), "hello\n");
    assert_eq!(shell.rt.last_return_value(), 0);
}

/// Scenario 2: `A=42; echo $A` — the assignment takes effect within the
/// line and persists afterwards at top level.
#[test]
fn assignment_then_use() {
    let shell = Shell::new();
    assert_eq!(shell.run("A=42; echo $A"), "42\n");
    assert_eq!(shell.rt.env_get("A").as_deref(), Some("42"));
}

/// Scenario 3: `A=42 echo $A` — the prefix assignment reaches the
/// command's process image, but `$A` is expanded by the parent where A is
/// unset, and A is not persisted.
#[test]
fn prefix_assignment_semantics() {
    let shell = Shell::new();
    assert_eq!(shell.run("A=42 echo $A"), "\n");
    assert!(shell.rt.env_get("A").is_none());
    // The image does see it:
    assert_eq!(shell.run("A=42 printenv A"), "42\n");
}

/// Scenario 4: single quotes preserve interior whitespace as one arg.
#[test]
fn single_quotes_preserve_whitespace() {
    let shell = Shell::new();
    assert_eq!(shell.run("echo 'a  b'"), "a  b\n");
}

/// Scenario 5: `echo "$HOME"/*.sh > out.txt` globs when there are matches
/// and stays literal otherwise.
#[test]
fn quoted_home_glob_redirect() {
    let shell = Shell::new();
    shell.write_file("bin/one.sh", "");
    shell.write_file("bin/two.sh", "");
    let home = shell.path("bin");
    let out = shell.path("out.txt");
    shell.run(&format!("HOME={home}"));

    shell.run(&format!("echo \"$HOME\"/*.sh > {out}"));
    let expected = format!("{} {}\n", shell.path("bin/one.sh"), shell.path("bin/two.sh"));
    assert_eq!(shell.read_file("out.txt"), expected);
    assert_eq!(shell.rt.last_return_value(), 0);

    shell.run(&format!("echo \"$HOME\"/*.rs > {out}"));
    assert_eq!(shell.read_file("out.txt"), format!("{home}/*.rs\n"));
}

/// Scenario 6: `!prefix` resolves against history, runs, and records the
/// resolved form.
#[test]
fn bang_prefix_event() {
    let shell = Shell::new();
    shell.run("echo hi");
    assert_eq!(shell.run("!ec"), "hi\n");
    assert_eq!(shell.rt.history_entries(), vec!["echo hi"]);
}
