// SPDX-License-Identifier: MIT

//! Tests for the lazy expansion driver: headers, history and alias
//! rewriting, and per-command expansion semantics.

use super::*;
use crate::ast::RedirectOp;
use crate::config::Config;
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
            std::env::temp_dir().join("stash-expand-tests"),
            MemTerminal::new(),
            Registry::with_builtins(),
        );
        let frame = Arc::new(Mutex::new(rt.state_snapshot()));
        Self { rt, frame }
    }

    fn set_env(&self, name: &str, value: &str) {
        self.frame.lock().environ.insert(name.to_string(), value.to_string());
    }

    fn set_alias(&self, name: &str, value: &str) {
        self.frame.lock().aliases.insert(name.to_string(), value.to_string());
    }

    fn expansion(&self, line: &str) -> Expansion {
        match Expansion::new(&self.rt, &self.frame, line) {
            Ok(expansion) => expansion,
            Err(e) => panic!("cannot expand {line:?}: {e}"),
        }
    }

    /// Expand everything eagerly and return the sequences.
    fn all(&self, line: &str) -> Vec<PipeSequence> {
        let mut expansion = self.expansion(line);
        let mut sequences = Vec::new();
        while let Some(next) = expansion.next_pipe_sequence() {
            match next {
                Ok(seq) => sequences.push(seq),
                Err(e) => panic!("sequence expansion failed for {line:?}: {e}"),
            }
        }
        sequences
    }

    fn first_command(&self, line: &str) -> SimpleCommand {
        self.all(line).remove(0).commands.remove(0)
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

#[test]
fn header_counts_sequences() {
    let h = Harness::new();
    let expansion = h.expansion("echo a; echo b & echo c");
    assert_eq!(expansion.len(), 3);
    assert_eq!(expansion.line(), "echo a ; echo b & echo c");
}

#[test]
fn header_normalizes_whitespace() {
    let h = Harness::new();
    let expansion = h.expansion("echo    hi");
    assert_eq!(expansion.line(), "echo hi");
}

#[test]
fn empty_line_has_no_sequences() {
    let h = Harness::new();
    let expansion = h.expansion("   ");
    assert_eq!(expansion.len(), 0);
    assert!(expansion.is_empty());
}

// ---------------------------------------------------------------------------
// Per-command expansion
// ---------------------------------------------------------------------------

#[test]
fn expands_cmd_word_and_args() {
    let h = Harness::new();
    h.set_env("A", "42");
    let cmd = h.first_command("echo $A 'b c'");
    assert_eq!(cmd.cmd_word, "echo");
    assert_eq!(cmd.args, vec!["42", "b c"]);
}

#[test]
fn assignment_value_joins_fields_with_spaces() {
    let h = Harness::new();
    h.set_env("A", "42");
    let cmd = h.first_command("B=x'y z'$A echo hi");
    assert_eq!(cmd.assignments.len(), 1);
    assert_eq!(cmd.assignments[0].identifier, "B");
    assert_eq!(cmd.assignments[0].value, "xy z42");
}

#[test]
fn empty_fields_are_dropped() {
    let h = Harness::new();
    let cmd = h.first_command("echo $UNSET_VARIABLE_Q");
    assert_eq!(cmd.cmd_word, "echo");
    assert!(cmd.args.is_empty());
}

#[test]
fn first_arg_promotes_to_empty_cmd_word() {
    let h = Harness::new();
    h.set_env("CMD", "echo");
    let cmd = h.first_command("$EMPTY_VARIABLE_Q $CMD hi");
    assert_eq!(cmd.cmd_word, "echo");
    assert_eq!(cmd.args, vec!["hi"]);
}

#[test]
fn redirect_filename_expands() {
    let h = Harness::new();
    h.set_env("OUT", "result.txt");
    let cmd = h.first_command("echo hi > $OUT");
    let redirect = cmd.io_redirect.expect("redirect");
    assert_eq!(redirect.filename, "result.txt");
    assert_eq!(redirect.operator, RedirectOp::Truncate);
}

#[test]
fn empty_redirect_filename_is_ambiguous() {
    let h = Harness::new();
    let mut expansion = h.expansion("echo hi > $UNSET_VARIABLE_Q");
    let result = expansion.next_pipe_sequence().expect("one sequence");
    assert!(matches!(result, Err(RuntimeError::BadSubstitution(_))));
}

#[test]
fn multi_field_redirect_filename_is_rejected() {
    let h = Harness::new();
    let mut expansion = h.expansion("echo hi > `echo one two`");
    let result = expansion.next_pipe_sequence().expect("one sequence");
    assert!(matches!(result, Err(RuntimeError::SingleExpansionRequired { .. })));
}

// ---------------------------------------------------------------------------
// History substitution
// ---------------------------------------------------------------------------

#[test]
fn bang_prefix_resolves_before_anything_runs() {
    let h = Harness::new();
    h.rt.add_history("echo hi");
    let expansion = h.expansion("!ec");
    assert_eq!(expansion.line(), "echo hi");
}

#[test]
fn unresolved_event_aborts() {
    let h = Harness::new();
    assert!(matches!(
        Expansion::new(&h.rt, &h.frame, "!nope"),
        Err(RuntimeError::EventNotFound { .. })
    ));
}

#[test]
fn bang_only_applies_to_command_words() {
    let h = Harness::new();
    let expansion = h.expansion("echo !not-an-event");
    assert_eq!(expansion.line(), "echo !not-an-event");
}

// ---------------------------------------------------------------------------
// Alias substitution
// ---------------------------------------------------------------------------

#[test]
fn alias_rewrites_cmd_word() {
    let h = Harness::new();
    h.set_alias("ll", "echo -la");
    let cmd = h.first_command("ll now");
    assert_eq!(cmd.cmd_word, "echo");
    assert_eq!(cmd.args, vec!["-la", "now"]);
}

#[test]
fn alias_header_keeps_pre_alias_form() {
    // History records the history-substituted form, not the alias-expanded
    // one.
    let h = Harness::new();
    h.set_alias("ll", "echo -la");
    let expansion = h.expansion("ll");
    assert_eq!(expansion.line(), "ll");
}

#[test]
fn alias_does_not_apply_to_args() {
    let h = Harness::new();
    h.set_alias("ll", "echo -la");
    let cmd = h.first_command("echo ll");
    assert_eq!(cmd.args, vec!["ll"]);
}

#[test]
fn self_referential_alias_terminates() {
    let h = Harness::new();
    h.set_alias("echo", "echo prefixed");
    let cmd = h.first_command("echo hi");
    assert_eq!(cmd.cmd_word, "echo");
    assert_eq!(cmd.args, vec!["prefixed", "hi"]);
}

#[test]
fn chained_aliases_resolve() {
    let h = Harness::new();
    h.set_alias("a", "b");
    h.set_alias("b", "echo deep");
    let cmd = h.first_command("a");
    assert_eq!(cmd.cmd_word, "echo");
    assert_eq!(cmd.args, vec!["deep"]);
}

// ---------------------------------------------------------------------------
// Command substitution
// ---------------------------------------------------------------------------

#[test]
fn backtick_output_becomes_fields() {
    let h = Harness::new();
    let cmd = h.first_command("echo `echo one two`");
    assert_eq!(cmd.args, vec!["one", "two"]);
}

#[test]
fn backtick_lines_join_with_spaces() {
    let h = Harness::new();
    let cmd = h.first_command("echo pre`echo a; echo b`post");
    assert_eq!(cmd.args, vec!["prea", "bpost"]);
}

#[test]
fn failing_backtick_is_empty_and_outer_runs() {
    let h = Harness::new();
    let cmd = h.first_command("echo `definitely-not-a-command-xyz` tail");
    assert_eq!(cmd.cmd_word, "echo");
    assert_eq!(cmd.args, vec!["tail"]);
}

#[test]
fn backtick_inside_double_quotes_substitutes_without_splitting() {
    let h = Harness::new();
    let cmd = h.first_command("echo \"x `echo one two` y\"");
    assert_eq!(cmd.args, vec!["x one two y"]);
}

// ---------------------------------------------------------------------------
// Field-count invariant
// ---------------------------------------------------------------------------

#[test]
fn raw_and_globbable_fields_stay_paired() {
    // A mix of quoted, escaped, and substituted parts still yields exactly
    // one (raw, globbable) pair per field; observable as one arg here.
    let h = Harness::new();
    h.set_env("A", "42");
    let cmd = h.first_command(r#"echo pre'?'$A"*"\?end"#);
    assert_eq!(cmd.args, vec!["pre?42*?end"]);
}
