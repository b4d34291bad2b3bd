// SPDX-License-Identifier: MIT

//! Tests for tab completion.

use std::sync::Arc;

use super::*;
use crate::config::Config;
use crate::runtime::{Registry, RunOptions, Runtime};
use crate::terminal::MemTerminal;

struct Bench {
    root: tempfile::TempDir,
    term: Arc<MemTerminal>,
    rt: Arc<Runtime>,
}

impl Bench {
    fn new() -> Self {
        let root = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => panic!("cannot create bench dir: {e}"),
        };
        if let Err(e) = std::fs::create_dir_all(root.path().join("bin")) {
            panic!("cannot create bin dir: {e}");
        }
        let term = MemTerminal::new();
        let rt = Runtime::new(
            Config::default(),
            root.path().to_path_buf(),
            term.clone(),
            Registry::with_builtins(),
        );
        Self { root, term, rt }
    }

    fn run(&self, line: &str) {
        self.rt
            .run(
                vec![line.to_string()],
                RunOptions { add_new_inp_line: Some(false), ..RunOptions::default() },
            )
            .join();
        self.term.clear_output();
    }

    fn file(&self, rel: &str) -> String {
        let path = self.root.path().join(rel);
        if let Err(e) = std::fs::write(&path, "") {
            panic!("cannot write {rel}: {e}");
        }
        path.display().to_string()
    }

    fn dir(&self, rel: &str) -> String {
        let path = self.root.path().join(rel);
        if let Err(e) = std::fs::create_dir_all(&path) {
            panic!("cannot create {rel}: {e}");
        }
        path.display().to_string()
    }
}

#[test]
fn unique_file_match_completes_with_trailing_space() {
    let bench = Bench::new();
    bench.file("notes.txt");
    let stem = bench.root.path().join("no").display().to_string();
    let line = format!("cat {stem}");

    let completion = bench.rt.complete(&line, None);
    match completion {
        Completion::Replaced { line: newline, cursor_at } => {
            assert_eq!(newline, format!("cat {} ", bench.root.path().join("notes.txt").display()));
            assert_eq!(cursor_at, newline.len());
            assert_eq!(bench.term.inp_line(), newline);
        }
        other => panic!("expected replacement, got {other:?}"),
    }
}

#[test]
fn directory_match_completes_with_slash_and_no_space() {
    let bench = Bench::new();
    bench.dir("subdir");
    let stem = bench.root.path().join("sub").display().to_string();

    let completion = bench.rt.complete(&format!("cat {stem}"), None);
    match completion {
        Completion::Replaced { line: newline, .. } => {
            assert!(newline.ends_with("subdir/"), "got {newline:?}");
        }
        other => panic!("expected replacement, got {other:?}"),
    }
}

#[test]
fn completes_to_longest_common_prefix() {
    let bench = Bench::new();
    bench.file("alpha1");
    bench.file("alpha2");
    let stem = bench.root.path().join("al").display().to_string();

    let completion = bench.rt.complete(&format!("cat {stem}"), None);
    match completion {
        Completion::Replaced { line: newline, .. } => {
            assert!(newline.ends_with("alpha"), "got {newline:?}");
            assert!(!newline.ends_with(' '));
        }
        other => panic!("expected replacement, got {other:?}"),
    }
}

#[test]
fn shows_candidates_when_nothing_extends() {
    let bench = Bench::new();
    bench.file("alpha1");
    bench.file("alpha2");
    let stem = bench.root.path().join("alpha").display().to_string();

    let completion = bench.rt.complete(&format!("cat {stem}"), None);
    match completion {
        Completion::Candidates { names, .. } => {
            assert_eq!(names.len(), 2);
        }
        other => panic!("expected candidates, got {other:?}"),
    }
    let shown = bench.term.output();
    assert!(shown.contains("alpha1") && shown.contains("alpha2"), "got {shown:?}");
}

#[test]
fn over_the_cap_shows_a_notice() {
    let bench = Bench::new();
    for i in 0..31 {
        bench.file(&format!("many{i:02}"));
    }
    let stem = bench.root.path().join("many").display().to_string();

    let completion = bench.rt.complete(&format!("cat {stem}"), None);
    assert!(matches!(completion, Completion::TooMany { count: 31, .. }));
    assert!(bench.term.output().contains("More than 30 possibilities"));
}

#[test]
fn command_position_offers_scripts_builtins_and_aliases() {
    let bench = Bench::new();
    bench.file("bin/greet.sh");

    match bench.rt.complete("gre", None) {
        Completion::Replaced { line, .. } => assert_eq!(line, "greet.sh "),
        other => panic!("expected replacement, got {other:?}"),
    }

    match bench.rt.complete("ech", None) {
        Completion::Replaced { line, .. } => assert_eq!(line, "echo "),
        other => panic!("expected replacement, got {other:?}"),
    }

    bench.run("alias grumble='echo g'");
    match bench.rt.complete("grum", None) {
        Completion::Replaced { line, .. } => assert_eq!(line, "grumble "),
        other => panic!("expected replacement, got {other:?}"),
    }
}

#[test]
fn dollar_prefix_offers_environment_names() {
    let bench = Bench::new();
    bench.run("ZQV_ONE=1");
    match bench.rt.complete("echo $ZQV_", None) {
        Completion::Replaced { line, .. } => assert_eq!(line, "echo $ZQV_ONE "),
        other => panic!("expected replacement, got {other:?}"),
    }
}

#[test]
fn cursor_in_the_middle_completes_that_token() {
    let bench = Bench::new();
    bench.run("ZQW_VAR=1");
    // Cursor right after `$ZQW` in `echo $ZQW tail`.
    let line = "echo $ZQW tail";
    match bench.rt.complete(line, Some(9)) {
        Completion::Replaced { line: newline, cursor_at } => {
            assert_eq!(newline, "echo $ZQW_VAR  tail");
            assert_eq!(cursor_at, "echo $ZQW_VAR ".len());
        }
        other => panic!("expected replacement, got {other:?}"),
    }
}

#[test]
fn unparsable_line_reports_and_keeps_the_line() {
    let bench = Bench::new();
    let completion = bench.rt.complete("echo 'open", None);
    assert!(matches!(completion, Completion::Invalid { .. }));
    assert!(bench.term.output().contains("syntax error"));
    assert_eq!(bench.term.inp_line(), "echo 'open");
}

#[test]
fn no_candidates_leaves_everything_alone() {
    let bench = Bench::new();
    let stem = bench.root.path().join("zz-nothing").display().to_string();
    let completion = bench.rt.complete(&format!("cat {stem}"), None);
    assert!(matches!(completion, Completion::NoMatch { .. }));
    assert_eq!(bench.term.output(), "");
}

struct FixedSub;

impl SubCompleter for FixedSub {
    fn complete(&self, toks: &[String]) -> (Option<Vec<String>>, bool) {
        assert_eq!(toks.first().map(|s| s.as_str()), Some("tool"));
        (Some(vec!["subcmd-a".into(), "subcmd-b".into()]), false)
    }
}

#[test]
fn sub_completer_overrides_candidates() {
    let bench = Bench::new();
    bench.rt.set_sub_completer(Arc::new(FixedSub));
    match bench.rt.complete("tool ", None) {
        Completion::Replaced { line, .. } => assert_eq!(line, "tool subcmd-"),
        other => panic!("expected replacement, got {other:?}"),
    }
}
