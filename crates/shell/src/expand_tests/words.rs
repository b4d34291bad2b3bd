// SPDX-License-Identifier: MIT

//! Tests for word expansion fields: quoting, escapes, and globbing.

use super::*;
use crate::config::Config;
use crate::parser::Parser;
use crate::runtime::Registry;
use crate::terminal::MemTerminal;

struct Harness {
    rt: Arc<Runtime>,
    frame: Arc<Mutex<WorkerState>>,
}

impl Harness {
    fn new() -> Self {
        let rt = Runtime::new(
            Config::default(),
            std::env::temp_dir().join("stash-word-tests"),
            MemTerminal::new(),
            Registry::with_builtins(),
        );
        let frame = Arc::new(Mutex::new(rt.state_snapshot()));
        Self { rt, frame }
    }

    fn set_env(&self, name: &str, value: &str) {
        self.frame.lock().environ.insert(name.to_string(), value.to_string());
    }

    /// Expand the first argument word of `echo <word>`.
    fn expand(&self, word: &str) -> Vec<String> {
        let line = format!("echo {word}");
        let parsed = match Parser::parse(&line) {
            Ok(parsed) => parsed,
            Err(e) => panic!("cannot parse {line:?}: {e}"),
        };
        let token = parsed.sequences[0].commands[0].args[0].clone();
        let ctx = ExpandCtx { rt: &self.rt, frame: &self.frame };
        match expand_word(&ctx, &token) {
            Ok(fields) => fields,
            Err(e) => panic!("cannot expand {word:?}: {e}"),
        }
    }
}

#[test]
fn plain_word_is_one_field() {
    let h = Harness::new();
    assert_eq!(h.expand("hello"), vec!["hello"]);
}

#[test]
fn single_quotes_preserve_whitespace() {
    let h = Harness::new();
    assert_eq!(h.expand("'a  b'"), vec!["a  b"]);
}

#[test]
fn single_quotes_suppress_variables() {
    let h = Harness::new();
    h.set_env("A", "42");
    assert_eq!(h.expand("'$A'"), vec!["$A"]);
}

#[test]
fn double_quotes_expand_variables() {
    let h = Harness::new();
    h.set_env("A", "42");
    assert_eq!(h.expand("\"$A!\""), vec!["42!"]);
}

#[test]
fn unquoted_variable_expansion() {
    let h = Harness::new();
    h.set_env("GREETING", "hi");
    assert_eq!(h.expand("$GREETING"), vec!["hi"]);
}

#[test]
fn glued_parts_concatenate() {
    let h = Harness::new();
    h.set_env("A", "42");
    assert_eq!(h.expand("pre'mid'$A\"end\""), vec!["premid42end"]);
}

#[yare::parameterized(
    tab = { r"a\tb", "a\tb" },
    newline = { r"a\nb", "a\nb" },
    carriage_return = { r"a\rb", "a\rb" },
    other_escape_is_itself = { r"a\qb", "aqb" },
    escaped_space = { r"a\ b", "a b" },
)]
fn escape_translation(input: &str, expected: &str) {
    let h = Harness::new();
    assert_eq!(h.expand(input), vec![expected.to_string()]);
}

#[test]
fn tilde_expands_in_first_part_only() {
    let h = Harness::new();
    h.set_env("HOME", "/home/u");
    assert_eq!(h.expand("~/bin"), vec!["/home/u/bin"]);
    assert_eq!(h.expand("'x'~/bin"), vec!["x~/bin"]);
}

#[test]
fn escape_wildcards_brackets_metacharacters() {
    assert_eq!(escape_wildcards("a*b?c[d]"), "a[*]b[?]c[[]d[]]");
    assert_eq!(escape_wildcards("plain"), "plain");
}

// ---------------------------------------------------------------------------
// Globbing
// ---------------------------------------------------------------------------

fn glob_fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in ["a.sh", "b.sh", "c.txt", ".hidden.sh"] {
        std::fs::write(dir.path().join(name), "").expect("write");
    }
    dir
}

#[test]
fn unquoted_glob_expands_to_matches() {
    let dir = glob_fixture();
    let h = Harness::new();
    let fields = h.expand(&format!("{}/*.sh", dir.path().display()));
    assert_eq!(fields.len(), 2);
    assert!(fields[0].ends_with("a.sh"));
    assert!(fields[1].ends_with("b.sh"));
}

#[test]
fn glob_without_matches_stays_literal() {
    let dir = glob_fixture();
    let h = Harness::new();
    let pattern = format!("{}/*.rs", dir.path().display());
    assert_eq!(h.expand(&pattern), vec![pattern]);
}

#[test]
fn hidden_files_need_a_literal_dot() {
    let dir = glob_fixture();
    let h = Harness::new();
    let fields = h.expand(&format!("{}/.*.sh", dir.path().display()));
    assert_eq!(fields.len(), 1);
    assert!(fields[0].ends_with(".hidden.sh"));
}

#[test]
fn quoted_glob_is_literal() {
    let dir = glob_fixture();
    let h = Harness::new();
    let quoted = format!("'{}/*.sh'", dir.path().display());
    let expected = format!("{}/*.sh", dir.path().display());
    assert_eq!(h.expand(&quoted), vec![expected]);
}

#[test]
fn double_quoted_glob_is_literal() {
    let dir = glob_fixture();
    let h = Harness::new();
    let quoted = format!("\"{}/*.sh\"", dir.path().display());
    let expected = format!("{}/*.sh", dir.path().display());
    assert_eq!(h.expand(&quoted), vec![expected]);
}

#[test]
fn escaped_wildcard_is_literal() {
    let dir = glob_fixture();
    let h = Harness::new();
    let pattern = format!("{}/\\*.sh", dir.path().display());
    let expected = format!("{}/*.sh", dir.path().display());
    assert_eq!(h.expand(&pattern), vec![expected]);
}

#[test]
fn quoted_prefix_with_unquoted_glob_expands() {
    // "$DIR"/*.sh — the quoted segment is glob-inert, the suffix globs.
    let dir = glob_fixture();
    let h = Harness::new();
    h.set_env("DIR", &dir.path().display().to_string());
    let fields = h.expand("\"$DIR\"/*.sh");
    assert_eq!(fields.len(), 2);
}
