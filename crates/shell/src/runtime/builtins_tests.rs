// SPDX-License-Identifier: MIT

//! Direct tests for the builtin commands.

use std::sync::Arc;

use super::*;
use crate::config::Config;
use crate::runtime::{Invocation, Registry, Runtime};
use crate::stream::Stream;
use crate::terminal::MemTerminal;

struct Bench {
    rt: Arc<Runtime>,
    state: crate::runtime::WorkerState,
    ins: Stream,
    outs: Stream,
    errs: Stream,
}

impl Bench {
    fn new() -> Self {
        let rt = Runtime::new(
            Config::default(),
            std::env::temp_dir(),
            MemTerminal::new(),
            Registry::new(),
        );
        let state = rt.state_snapshot();
        Self { rt, state, ins: Stream::memory(), outs: Stream::memory(), errs: Stream::memory() }
    }

    fn run(&mut self, command: &dyn Command, argv: &[&str]) -> i32 {
        let mut environ = self.state.environ.clone();
        environ.extend(self.state.enclosing_environ.clone());
        let mut ctx = Invocation {
            rt: self.rt.as_ref(),
            argv: argv.iter().map(|s| s.to_string()).collect(),
            environ,
            state: &mut self.state,
            ins: self.ins.clone(),
            outs: self.outs.clone(),
            errs: self.errs.clone(),
        };
        command.run(&mut ctx)
    }

    fn out(&self) -> String {
        self.outs.capture().unwrap_or_default()
    }

    fn err(&self) -> String {
        self.errs.capture().unwrap_or_default()
    }
}

#[test]
fn echo_joins_args_with_spaces() {
    let mut bench = Bench::new();
    let code = bench.run(&Echo, &["echo", "hello", "world"]);
    assert_eq!(code, 0);
    assert_eq!(bench.out(), "hello world\n");
}

#[test]
fn echo_without_args_prints_newline() {
    let mut bench = Bench::new();
    bench.run(&Echo, &["echo"]);
    assert_eq!(bench.out(), "\n");
}

#[test]
fn cat_copies_stdin() {
    let mut bench = Bench::new();
    bench.ins.write_str("hello\n").expect("write");
    let code = bench.run(&Cat, &["cat"]);
    assert_eq!(code, 0);
    assert_eq!(bench.out(), "hello\n");
}

#[test]
fn cat_reads_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("f.txt");
    std::fs::write(&path, "contents\n").expect("write");

    let mut bench = Bench::new();
    let path = path.display().to_string();
    let code = bench.run(&Cat, &["cat", &path]);
    assert_eq!(code, 0);
    assert_eq!(bench.out(), "contents\n");
}

#[test]
fn cat_reports_missing_file() {
    let mut bench = Bench::new();
    let code = bench.run(&Cat, &["cat", "/no/such/file"]);
    assert_eq!(code, 1);
    assert!(bench.err().starts_with("cat: /no/such/file"));
}

#[test]
fn printenv_lists_sorted_environment() {
    let mut bench = Bench::new();
    bench.state.environ.insert("ZED".into(), "z".into());
    bench.state.environ.insert("ABC".into(), "a".into());
    bench.run(&Printenv, &["printenv"]);
    let out = bench.out();
    let abc = out.find("ABC=a").expect("ABC present");
    let zed = out.find("ZED=z").expect("ZED present");
    assert!(abc < zed);
}

#[test]
fn printenv_single_name() {
    let mut bench = Bench::new();
    bench.state.environ.insert("ONLY".into(), "value".into());
    let code = bench.run(&Printenv, &["printenv", "ONLY"]);
    assert_eq!(code, 0);
    assert_eq!(bench.out(), "value\n");
}

#[test]
fn printenv_missing_name_fails() {
    let mut bench = Bench::new();
    let code = bench.run(&Printenv, &["printenv", "NO_SUCH_VAR_SET"]);
    assert_eq!(code, 1);
}

#[test]
fn printenv_sees_prefix_assignments() {
    let mut bench = Bench::new();
    bench.state.enclosing_environ.insert("A".into(), "42".into());
    let code = bench.run(&Printenv, &["printenv", "A"]);
    assert_eq!(code, 0);
    assert_eq!(bench.out(), "42\n");
}

#[test]
fn pwd_prints_frame_cwd() {
    let mut bench = Bench::new();
    bench.state.cwd = std::path::PathBuf::from("/somewhere");
    bench.run(&Pwd, &["pwd"]);
    assert_eq!(bench.out(), "/somewhere\n");
}

#[test]
#[serial_test::serial]
fn cd_moves_frame_and_process() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().canonicalize().expect("canonicalize");
    let before = std::env::current_dir().expect("cwd");

    let mut bench = Bench::new();
    let arg = target.display().to_string();
    let code = bench.run(&Cd, &["cd", &arg]);
    assert_eq!(code, 0);
    assert_eq!(bench.state.cwd, target);
    assert_eq!(std::env::current_dir().expect("cwd"), target);

    std::env::set_current_dir(before).expect("restore cwd");
}

#[test]
fn cd_to_missing_directory_fails() {
    let mut bench = Bench::new();
    let code = bench.run(&Cd, &["cd", "/no/such/dir"]);
    assert_eq!(code, 1);
    assert!(bench.err().starts_with("cd: /no/such/dir"));
}

#[test]
fn alias_sets_and_lists() {
    let mut bench = Bench::new();
    let code = bench.run(&Alias, &["alias", "ll=ls -la"]);
    assert_eq!(code, 0);
    assert_eq!(bench.state.aliases.get("ll").map(|s| s.as_str()), Some("ls -la"));

    bench.run(&Alias, &["alias"]);
    assert_eq!(bench.out(), "alias ll='ls -la'\n");
}

#[test]
fn alias_lookup_unknown_fails() {
    let mut bench = Bench::new();
    let code = bench.run(&Alias, &["alias", "nope"]);
    assert_eq!(code, 1);
}

#[test]
fn unalias_removes() {
    let mut bench = Bench::new();
    bench.state.aliases.insert("x".into(), "y".into());
    let code = bench.run(&Unalias, &["unalias", "x"]);
    assert_eq!(code, 0);
    assert!(bench.state.aliases.is_empty());
    assert_eq!(bench.run(&Unalias, &["unalias", "x"]), 1);
}

#[test]
fn true_and_false_codes() {
    let mut bench = Bench::new();
    assert_eq!(bench.run(&TrueCmd, &["true"]), 0);
    assert_eq!(bench.run(&FalseCmd, &["false"]), 1);
}
