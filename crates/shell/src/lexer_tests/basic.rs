// SPDX-License-Identifier: MIT

//! Basic lexer tests: words, operators, whitespace, comments.

use super::*;

lex_tests! {
    empty_input: "" => [],
    whitespace_only: "   \t  " => [],
}

lex_tests! {
    single_word: "echo" => [(TokenKind::Word, "echo")],
    simple_words: "echo hello world" => [
        (TokenKind::Word, "echo"),
        (TokenKind::Word, "hello"),
        (TokenKind::Word, "world"),
    ],
    multiple_spaces: "ls   -la" => [
        (TokenKind::Word, "ls"),
        (TokenKind::Word, "-la"),
    ],
    tabs_and_spaces: "cmd1\t  cmd2" => [
        (TokenKind::Word, "cmd1"),
        (TokenKind::Word, "cmd2"),
    ],
    flags_and_paths: "ls -la ./path/to/file.txt" => [
        (TokenKind::Word, "ls"),
        (TokenKind::Word, "-la"),
        (TokenKind::Word, "./path/to/file.txt"),
    ],
    dollar_is_a_word_char: "echo $HOME" => [
        (TokenKind::Word, "echo"),
        (TokenKind::Word, "$HOME"),
    ],
    bang_is_a_word_char: "!ec" => [(TokenKind::Word, "!ec")],
    assignment_is_one_word: "A=42" => [(TokenKind::Word, "A=42")],
}

lex_tests! {
    pipe_operator: "ls | grep foo" => [
        (TokenKind::Word, "ls"),
        (TokenKind::PipeOp, "|"),
        (TokenKind::Word, "grep"),
        (TokenKind::Word, "foo"),
    ],
    pipe_without_spaces: "ls|grep" => [
        (TokenKind::Word, "ls"),
        (TokenKind::PipeOp, "|"),
        (TokenKind::Word, "grep"),
    ],
    semicolon: "cmd1 ; cmd2" => [
        (TokenKind::Word, "cmd1"),
        (TokenKind::Punctuator, ";"),
        (TokenKind::Word, "cmd2"),
    ],
    background: "sleep 10 &" => [
        (TokenKind::Word, "sleep"),
        (TokenKind::Word, "10"),
        (TokenKind::Punctuator, "&"),
    ],
    redirect_truncate: "echo hi > out.txt" => [
        (TokenKind::Word, "echo"),
        (TokenKind::Word, "hi"),
        (TokenKind::IoRedirectOp, ">"),
        (TokenKind::Word, "out.txt"),
    ],
    redirect_append: "echo hi >> out.txt" => [
        (TokenKind::Word, "echo"),
        (TokenKind::Word, "hi"),
        (TokenKind::IoRedirectOp, ">>"),
        (TokenKind::Word, "out.txt"),
    ],
    redirect_without_spaces: "echo>f" => [
        (TokenKind::Word, "echo"),
        (TokenKind::IoRedirectOp, ">"),
        (TokenKind::Word, "f"),
    ],
}

lex_tests! {
    comment_only: "# a comment" => [],
    comment_after_command: "echo hi # trailing words" => [
        (TokenKind::Word, "echo"),
        (TokenKind::Word, "hi"),
    ],
    hash_inside_word_is_literal: "echo hi#there" => [
        (TokenKind::Word, "echo"),
        (TokenKind::Word, "hi#there"),
    ],
}

span_tests! {
    single_word_span: "echo" => [(0, 4)],
    words_span: "echo hello" => [(0, 4), (5, 10)],
    pipe_span: "ls | grep" => [(0, 2), (3, 4), (5, 9)],
    append_span: "a >> b" => [(0, 1), (2, 4), (5, 6)],
    quoted_word_span: "echo 'a b'" => [(0, 4), (5, 10)],
}

#[test]
fn word_text_equals_concatenated_parts() {
    let tokens = Lexer::tokenize(r#"pre'mid'"end""#).expect("tokenize");
    assert_eq!(tokens.len(), 1);
    let word = &tokens[0];
    let joined: String = word.parts.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(word.text, joined);
    let mut pos = word.span.start;
    for part in &word.parts {
        assert_eq!(part.span.start, pos, "parts must be adjacent");
        pos = part.span.end;
    }
    assert_eq!(pos, word.span.end);
}
