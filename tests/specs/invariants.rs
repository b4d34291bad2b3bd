// SPDX-License-Identifier: MIT

//! Cross-cutting invariants.

use serial_test::serial;
use stash_shell::{Parser, TokenKind};

use super::prelude::Shell;

/// Rejoining a token stream with single spaces and re-parsing yields an
/// equivalent stream.
#[test]
fn parser_round_trip() {
    for line in [
        "echo hello | cat",
        "A=1 B='x y' cmd arg1 \"arg 2\" > out.txt",
        "a; b & c | d",
        "echo pre'mid'post `date` \\; done",
    ] {
        let first = Parser::parse(line).expect("parse");
        let rejoined = first.rejoin();
        let second = Parser::parse(&rejoined).expect("re-parse");

        let stream = |p: &stash_shell::ParsedLine| -> Vec<(TokenKind, String)> {
            p.tokens.iter().map(|t| (t.kind, t.text.clone())).collect()
        };
        assert_eq!(stream(&first), stream(&second), "line: {line:?}");
    }
}

/// After every run the caller's view of the stack and cwd is unchanged
/// (unless a top-level command changed the directory on purpose).
#[test]
#[serial]
fn cwd_restored_after_scripts_and_failures() {
    let shell = Shell::new();
    let before = std::env::current_dir().expect("cwd");
    let target = shell.path("bin");

    shell.write_file("bin/wander.sh", &format!("cd {target}\npwd\n"));
    shell.run("wander");
    assert_eq!(std::env::current_dir().expect("cwd"), before);
    assert_eq!(shell.rt.cwd(), before);

    shell.run("no-such-command-anywhere");
    assert_eq!(std::env::current_dir().expect("cwd"), before);
}

/// Consecutive runs see each other's state only through the documented
/// persistence rules.
#[test]
fn environment_flows_only_at_top_level() {
    let shell = Shell::new();
    shell.write_file("bin/try.sh", "INNER=1\n");
    shell.run("OUTER=1");
    shell.run("try");
    assert_eq!(shell.rt.env_get("OUTER").as_deref(), Some("1"));
    assert!(shell.rt.env_get("INNER").is_none());
}

/// A worker per run: `$$` differs between runs but is stable within one
/// line.
#[test]
fn worker_ids_are_per_run() {
    let shell = Shell::new();
    let same = shell.run("echo $$ $$");
    let parts: Vec<&str> = same.trim_end().split(' ').collect();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], parts[1]);

    let next = shell.run("echo $$");
    assert_ne!(same, next);
}
