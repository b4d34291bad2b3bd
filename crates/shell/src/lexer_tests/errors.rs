// SPDX-License-Identifier: MIT

//! Lexer error tests.

use super::*;

lex_error_tests! {
    unterminated_single: "echo 'oops" =>
        ParseError::UnterminatedQuote { quote: QuoteKind::Single, .. },
    unterminated_double: "echo \"oops" =>
        ParseError::UnterminatedQuote { quote: QuoteKind::Double, .. },
    unterminated_backtick: "echo `oops" =>
        ParseError::UnterminatedQuote { quote: QuoteKind::Backtick, .. },
    trailing_backslash: "echo \\" => ParseError::TrailingBackslash { .. },
    input_redirect_is_not_supported: "cmd < file" => ParseError::UnexpectedChar { ch: '<', .. },
}

#[test]
fn unterminated_quote_reports_offset_and_remainder() {
    let err = Lexer::tokenize("echo 'oops").expect_err("should fail");
    match err {
        ParseError::UnterminatedQuote { pos, remainder, .. } => {
            assert_eq!(pos, 5);
            assert_eq!(remainder, "'oops");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn escaped_quote_keeps_it_open() {
    // The backslash escapes the closing double quote, so the quote never
    // terminates.
    let err = Lexer::tokenize(r#"echo "a\""#).expect_err("should fail");
    assert!(matches!(err, ParseError::UnterminatedQuote { quote: QuoteKind::Double, .. }));
}
