// SPDX-License-Identifier: MIT

//! Boundary behaviors around parsing, expansion, and substitution.

use super::prelude::Shell;

/// An empty line is a no-op: no output, no history entry.
#[test]
fn empty_line_is_a_no_op() {
    let shell = Shell::new();
    assert_eq!(shell.run(""), "");
    assert_eq!(shell.run("   \t "), "");
    assert!(shell.rt.history_entries().is_empty());
}

/// A line of just `;` or `&` is a parser error.
#[test]
fn lone_punctuators_are_parse_errors() {
    let shell = Shell::new();
    assert!(shell.run(";").starts_with("stash: syntax error"));
    assert!(shell.run("&").starts_with("stash: syntax error"));
}

/// A redirect whose filename expands to nothing is ambiguous.
#[test]
fn empty_redirect_filename_is_ambiguous() {
    let shell = Shell::new();
    assert_eq!(shell.run("echo hi > $NOT_SET_ANYWHERE"), "stash: ambiguous redirect\n");
}

/// A failing command inside backticks substitutes as the empty string and
/// the outer command still runs.
#[test]
fn failing_backtick_yields_empty() {
    let shell = Shell::new();
    let output = shell.run("echo start `no-such-command-zz` end");
    // The nested worker reports its own failure, then the outer echo runs
    // with the substitution collapsed to nothing.
    assert!(output.contains("no-such-command-zz: command not found"), "got {output:?}");
    assert!(output.ends_with("start end\n"), "got {output:?}");
}

/// A glob pattern inside double quotes stays literal.
#[test]
fn quoted_glob_is_literal() {
    let shell = Shell::new();
    shell.write_file("bin/x.sh", "");
    assert_eq!(shell.run("echo \"*.sh\""), "*.sh\n");
}

/// History keeps its bound, newest first, without consecutive duplicates.
#[test]
fn history_bounds_and_dedup() {
    let mut config = stash_shell::Config::default();
    config.display.history_max = 3;
    let shell = Shell::with_config(config);

    shell.run("echo a");
    shell.run("echo a");
    shell.run("echo b");
    shell.run("echo c");
    shell.run("echo d");

    let entries = shell.rt.history_entries();
    assert_eq!(entries, vec!["echo d", "echo c", "echo b"]);
}

/// An unresolvable `!` event reports `event not found`.
#[test]
fn unresolved_event_is_reported() {
    let shell = Shell::new();
    assert_eq!(shell.run("!nope"), "stash: !nope: event not found\n");
}

/// Words after a redirect are a parse error, as is a dangling pipe.
#[test]
fn trailing_junk_is_rejected() {
    let shell = Shell::new();
    assert!(shell.run("echo hi > f extra").starts_with("stash: syntax error"));
    assert!(shell.run("echo hi |").starts_with("stash: syntax error"));
}
