// SPDX-License-Identifier: MIT

//! Tests for pipe sequences, punctuators, and background marking.

use super::*;

#[test]
fn single_pipe() {
    let parsed = parse("echo hello | cat");
    assert_eq!(parsed.sequences.len(), 1);
    let seq = &parsed.sequences[0];
    assert_eq!(seq.commands.len(), 2);
    assert!(!seq.in_background);
    assert_eq!(seq.commands[1].cmd_word.as_ref().map(|t| t.text.as_str()), Some("cat"));
}

#[test]
fn three_stage_pipe() {
    let parsed = parse("a | b | c");
    assert_eq!(parsed.sequences[0].commands.len(), 3);
}

#[test]
fn semicolon_separates_sequences() {
    let parsed = parse("A=42; echo $A");
    assert_eq!(parsed.sequences.len(), 2);
    assert!(parsed.sequences[0].commands[0].cmd_word.is_none());
    assert_eq!(
        parsed.sequences[1].commands[0].cmd_word.as_ref().map(|t| t.text.as_str()),
        Some("echo")
    );
}

#[test]
fn trailing_semicolon_is_allowed() {
    let parsed = parse("echo hi;");
    assert_eq!(parsed.sequences.len(), 1);
}

#[test]
fn ampersand_backgrounds_preceding_sequence() {
    let parsed = parse("sleep 5 & echo hi");
    assert_eq!(parsed.sequences.len(), 2);
    assert!(parsed.sequences[0].in_background);
    assert!(!parsed.sequences[1].in_background);
}

#[test]
fn trailing_ampersand() {
    let parsed = parse("worker &");
    assert_eq!(parsed.sequences.len(), 1);
    assert!(parsed.sequences[0].in_background);
}

#[test]
fn each_pipe_stage_gets_fresh_cmd_classification() {
    let parsed = parse("a one | b two");
    let cmd_tokens: Vec<&str> = parsed
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Cmd)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(cmd_tokens, vec!["a", "b"]);
}

#[test]
fn punctuators_appear_once_in_stream() {
    let parsed = parse("a; b & c");
    let punct_count = parsed.tokens.iter().filter(|t| t.kind == TokenKind::Punctuator).count();
    assert_eq!(punct_count, 2);
}

#[test]
fn token_positions_are_monotonic() {
    let parsed = parse("A=1 echo 'x y' | cat > out; next &");
    let starts: Vec<usize> = parsed.tokens.iter().map(|t| t.span.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}
