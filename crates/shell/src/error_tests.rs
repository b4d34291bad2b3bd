// SPDX-License-Identifier: MIT

//! Tests for parse error formatting.

use super::*;

#[test]
fn unexpected_char_message() {
    let err = ParseError::UnexpectedChar { ch: '<', pos: 4, remainder: "< in".into() };
    assert_eq!(err.to_string(), "syntax error: at char 4: unexpected character '<' in: < in");
    assert_eq!(err.pos(), 4);
}

#[test]
fn unterminated_quote_message() {
    let err = ParseError::UnterminatedQuote {
        quote: QuoteKind::Single,
        pos: 5,
        remainder: "'oops".into(),
    };
    assert_eq!(err.to_string(), "syntax error: at char 5: unterminated single quote: 'oops");
}

#[test]
fn unexpected_token_message() {
    let err = ParseError::UnexpectedToken { expected: "a word".into(), pos: 0, remainder: ";".into() };
    assert!(err.to_string().contains("expected a word"));
    assert_eq!(err.pos(), 0);
}

#[test]
fn context_points_at_offset() {
    let err = ParseError::UnexpectedChar { ch: '<', pos: 4, remainder: "<".into() };
    let ctx = err.context("cmd <", 10);
    assert_eq!(ctx, "cmd <\n    ^");
}
