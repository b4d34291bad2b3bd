// SPDX-License-Identifier: MIT

//! Tests for the double-quote interior parser.

use super::*;

#[test]
fn plain_text_is_one_part() {
    let parts = Parser::parse_within_dq("hello world").expect("parse");
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].kind, TokenKind::UnquotedWord);
    assert_eq!(parts[0].text, "hello world");
}

#[test]
fn empty_interior_has_no_parts() {
    let parts = Parser::parse_within_dq("").expect("parse");
    assert!(parts.is_empty());
}

#[test]
fn escape_splits_parts() {
    let parts = Parser::parse_within_dq(r"a\tb").expect("parse");
    let texts: Vec<&str> = parts.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["a", r"\t", "b"]);
    assert_eq!(parts[1].kind, TokenKind::Escaped);
}

#[test]
fn backtick_segment_is_captured_whole() {
    let parts = Parser::parse_within_dq("now: `date` done").expect("parse");
    let kinds: Vec<TokenKind> = parts.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::UnquotedWord, TokenKind::BacktickWord, TokenKind::UnquotedWord]
    );
    assert_eq!(parts[1].text, "`date`");
}

#[test]
fn unterminated_backtick_is_rejected() {
    assert!(matches!(
        Parser::parse_within_dq("oops `date"),
        Err(ParseError::UnterminatedQuote { .. })
    ));
}

#[test]
fn dollar_stays_in_plain_run() {
    // Variables are recognised during expansion, not here.
    let parts = Parser::parse_within_dq("$HOME/dir").expect("parse");
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].text, "$HOME/dir");
}
