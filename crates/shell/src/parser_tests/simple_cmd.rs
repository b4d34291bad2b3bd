// SPDX-License-Identifier: MIT

//! Tests for single simple commands: classification, assignments, redirects.

use super::*;

#[test]
fn classifies_cmd_and_args() {
    let parsed = parse("echo hello world");
    assert_eq!(kinds(&parsed), vec![TokenKind::Cmd, TokenKind::Word, TokenKind::Word]);

    let seq = &parsed.sequences[0];
    let cmd = &seq.commands[0];
    assert_eq!(cmd.cmd_word.as_ref().map(|t| t.text.as_str()), Some("echo"));
    assert_eq!(cmd.args.len(), 2);
    assert_eq!(cmd.args[0].text, "hello");
    assert_eq!(cmd.args[1].text, "world");
}

#[test]
fn prefix_assignment() {
    let parsed = parse("A=42 echo hi");
    assert_eq!(kinds(&parsed), vec![TokenKind::AssignWord, TokenKind::Cmd, TokenKind::Word]);

    let cmd = &parsed.sequences[0].commands[0];
    assert_eq!(cmd.assignments.len(), 1);
    assert_eq!(cmd.assignments[0].identifier, "A");
    assert_eq!(cmd.assignments[0].value.text, "42");
}

#[test]
fn multiple_prefix_assignments() {
    let parsed = parse("A=1 B=2 cmd");
    let cmd = &parsed.sequences[0].commands[0];
    assert_eq!(cmd.assignments.len(), 2);
    assert_eq!(cmd.assignments[1].identifier, "B");
}

#[test]
fn pure_assignment_has_no_cmd_word() {
    let parsed = parse("A=42");
    let cmd = &parsed.sequences[0].commands[0];
    assert!(cmd.cmd_word.is_none());
    assert_eq!(cmd.assignments.len(), 1);
}

#[test]
fn assignment_value_may_be_quoted() {
    let parsed = parse("A=\"x y\" cmd");
    let cmd = &parsed.sequences[0].commands[0];
    assert_eq!(cmd.assignments[0].value.text, "\"x y\"");
    assert_eq!(cmd.assignments[0].value.parts.len(), 1);
    assert_eq!(cmd.assignments[0].value.parts[0].kind, TokenKind::DoubleQuotedWord);
}

#[test]
fn assignment_value_spans_glued_parts() {
    let parsed = parse("A=pre'post' cmd");
    let cmd = &parsed.sequences[0].commands[0];
    let value = &cmd.assignments[0].value;
    assert_eq!(value.text, "pre'post'");
    assert_eq!(value.parts.len(), 2);
    assert_eq!(value.parts[0].text, "pre");
    assert_eq!(value.parts[1].text, "'post'");
}

#[test]
fn bare_equals_suffix_is_a_plain_word() {
    // `A=` has no value, so the grammar falls back to treating it as the
    // command word.
    let parsed = parse("A=");
    let cmd = &parsed.sequences[0].commands[0];
    assert!(cmd.assignments.is_empty());
    assert_eq!(cmd.cmd_word.as_ref().map(|t| t.text.as_str()), Some("A="));
}

#[test]
fn assignment_after_cmd_word_is_an_arg() {
    let parsed = parse("env A=42");
    let cmd = &parsed.sequences[0].commands[0];
    assert!(cmd.assignments.is_empty());
    assert_eq!(cmd.args[0].text, "A=42");
    assert_eq!(cmd.args[0].kind, TokenKind::Word);
}

#[test]
fn invalid_identifier_is_not_an_assignment() {
    let parsed = parse("2A=3");
    let cmd = &parsed.sequences[0].commands[0];
    assert!(cmd.assignments.is_empty());
    assert_eq!(cmd.cmd_word.as_ref().map(|t| t.text.as_str()), Some("2A=3"));
}

#[test]
fn redirect_truncate() {
    let parsed = parse("echo hi > out.txt");
    assert_eq!(
        kinds(&parsed),
        vec![TokenKind::Cmd, TokenKind::Word, TokenKind::IoRedirectOp, TokenKind::File]
    );
    let cmd = &parsed.sequences[0].commands[0];
    let redirect = cmd.io_redirect.as_ref().expect("redirect");
    assert_eq!(redirect.operator, RedirectOp::Truncate);
    assert_eq!(redirect.filename.text, "out.txt");
}

#[test]
fn redirect_append() {
    let parsed = parse("echo hi >> log");
    let cmd = &parsed.sequences[0].commands[0];
    assert_eq!(cmd.io_redirect.as_ref().map(|r| r.operator), Some(RedirectOp::Append));
}

#[test]
fn redirect_without_args() {
    let parsed = parse("cmd > f");
    let cmd = &parsed.sequences[0].commands[0];
    assert!(cmd.args.is_empty());
    assert!(cmd.io_redirect.is_some());
}

#[test]
fn assignments_with_redirect_and_no_cmd_word() {
    let parsed = parse("A=1 > f");
    let cmd = &parsed.sequences[0].commands[0];
    assert!(cmd.cmd_word.is_none());
    assert_eq!(cmd.assignments.len(), 1);
    assert!(cmd.io_redirect.is_some());
}

#[test]
fn history_word_parses_as_cmd() {
    let parsed = parse("!ec");
    assert_eq!(kinds(&parsed), vec![TokenKind::Cmd]);
    assert_eq!(parsed.tokens[0].text, "!ec");
}
