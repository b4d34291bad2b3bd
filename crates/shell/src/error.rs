// SPDX-License-Identifier: MIT

//! Parse error types for the line lexer and parser.

use crate::span::{context_snippet, Span};
use thiserror::Error;

/// Errors produced while lexing or parsing one input line.
///
/// Every variant reports the byte offset of the failure and the offending
/// remainder of the line; no partial parse is surfaced alongside an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error: at char {pos}: unexpected character '{ch}' in: {remainder}")]
    UnexpectedChar { ch: char, pos: usize, remainder: String },

    #[error("syntax error: at char {pos}: trailing backslash")]
    TrailingBackslash { pos: usize },

    #[error("syntax error: at char {pos}: unterminated {quote} quote: {remainder}")]
    UnterminatedQuote { quote: QuoteKind, pos: usize, remainder: String },

    #[error("syntax error: at char {pos}: expected {expected} in: {remainder}")]
    UnexpectedToken { expected: String, pos: usize, remainder: String },

    #[error("syntax error: at char {pos}: unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String, pos: usize },
}

/// Which quote style was left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Single,
    Double,
    Backtick,
}

impl std::fmt::Display for QuoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            QuoteKind::Single => "single",
            QuoteKind::Double => "double",
            QuoteKind::Backtick => "backtick",
        })
    }
}

impl ParseError {
    /// Byte offset of the failure in the input line.
    pub fn pos(&self) -> usize {
        match self {
            Self::UnexpectedChar { pos, .. }
            | Self::TrailingBackslash { pos }
            | Self::UnterminatedQuote { pos, .. }
            | Self::UnexpectedToken { pos, .. }
            | Self::UnexpectedEof { pos, .. } => *pos,
        }
    }

    /// Generate a caret snippet pointing at the failure position.
    pub fn context(&self, input: &str, context_chars: usize) -> String {
        context_snippet(input, Span::empty(self.pos()), context_chars)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
