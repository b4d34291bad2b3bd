// SPDX-License-Identifier: MIT

//! Quoting and escape tests: quotes are kept verbatim in token text, and
//! adjacent segments glue into one word.

use super::*;

part_tests! {
    single_quoted: "'a  b'" => [(TokenKind::SingleQuotedWord, "'a  b'")],
    double_quoted: "\"a b\"" => [(TokenKind::DoubleQuotedWord, "\"a b\"")],
    backtick: "`ls -la`" => [(TokenKind::BacktickWord, "`ls -la`")],
    escaped_char: r"\n" => [(TokenKind::Escaped, r"\n")],
    escaped_space: r"a\ b" => [
        (TokenKind::UnquotedWord, "a"),
        (TokenKind::Escaped, r"\ "),
        (TokenKind::UnquotedWord, "b"),
    ],
    glued_segments: "pre'mid'post" => [
        (TokenKind::UnquotedWord, "pre"),
        (TokenKind::SingleQuotedWord, "'mid'"),
        (TokenKind::UnquotedWord, "post"),
    ],
    dq_then_glob: "\"$HOME\"/*.sh" => [
        (TokenKind::DoubleQuotedWord, "\"$HOME\""),
        (TokenKind::UnquotedWord, "/*.sh"),
    ],
}

part_tests! {
    // Backslash escapes the closing quote inside double quotes...
    dq_escaped_close: r#""a\"b""# => [(TokenKind::DoubleQuotedWord, r#""a\"b""#)],
    bq_escaped_close: r"`a\`b`" => [(TokenKind::BacktickWord, r"`a\`b`")],
}

lex_tests! {
    // ...but not inside single quotes: the quote closes at the backslash's
    // next quote character and lexing continues.
    sq_backslash_does_not_escape_close: r"'a\' b" => [
        (TokenKind::Word, r"'a\'"),
        (TokenKind::Word, "b"),
    ],
    operators_inside_quotes_are_literal: "echo 'a | b; c > d'" => [
        (TokenKind::Word, "echo"),
        (TokenKind::Word, "'a | b; c > d'"),
    ],
    comment_marker_inside_quotes: "echo '# not a comment'" => [
        (TokenKind::Word, "echo"),
        (TokenKind::Word, "'# not a comment'"),
    ],
}

#[test]
fn escaped_operator_joins_word() {
    let tokens = Lexer::tokenize(r"a\;b").expect("tokenize");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text, r"a\;b");
    assert_eq!(tokens[0].parts.len(), 3);
}
