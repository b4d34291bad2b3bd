// SPDX-License-Identifier: MIT

//! Tests for token classification helpers.

use super::*;

#[test]
fn part_kinds() {
    assert!(TokenKind::Escaped.is_part());
    assert!(TokenKind::UnquotedWord.is_part());
    assert!(TokenKind::BacktickWord.is_part());
    assert!(TokenKind::DoubleQuotedWord.is_part());
    assert!(TokenKind::SingleQuotedWord.is_part());
    assert!(!TokenKind::Word.is_part());
    assert!(!TokenKind::Punctuator.is_part());
}

#[test]
fn word_kinds() {
    assert!(TokenKind::Word.is_word());
    assert!(TokenKind::File.is_word());
    assert!(TokenKind::AssignWord.is_word());
    assert!(TokenKind::Cmd.is_word());
    assert!(!TokenKind::PipeOp.is_word());
    assert!(!TokenKind::UnquotedWord.is_word());
}

#[test]
fn retag_preserves_text_and_parts() {
    let part = Token::leaf("hi", Span::new(0, 2), TokenKind::UnquotedWord);
    let word = Token::composite("hi", Span::new(0, 2), TokenKind::Word, vec![part]);
    let cmd = word.retag(TokenKind::Cmd);
    assert_eq!(cmd.kind, TokenKind::Cmd);
    assert_eq!(cmd.text, "hi");
    assert_eq!(cmd.parts.len(), 1);
}

#[test]
fn identifier_validation() {
    assert!(is_identifier("A"));
    assert!(is_identifier("_private"));
    assert!(is_identifier("VAR_2"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("2var"));
    assert!(!is_identifier("has-dash"));
    assert!(!is_identifier("has.dot"));
}
