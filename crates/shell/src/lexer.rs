// SPDX-License-Identifier: MIT

//! Line lexer: splits one input line into operator tokens and composite
//! words made of escaped, unquoted, backtick, double-quoted, and
//! single-quoted parts.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{ParseError, QuoteKind};
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Characters that may appear in an unquoted word.
///
/// Note that `$`, `!`, `=`, braces, brackets, and parens are ordinary word
/// characters here; variable and history references are recognised later,
/// during expansion.
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '!' | '#'
                | '$'
                | '%'
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | '-'
                | '.'
                | '/'
                | ':'
                | '='
                | '?'
                | '@'
                | '['
                | ']'
                | '^'
                | '_'
                | '{'
                | '}'
                | '~'
        )
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, chars: input.char_indices().peekable() }
    }

    /// Tokenize an entire line.
    ///
    /// The result contains only `Punctuator`, `PipeOp`, `IoRedirectOp`, and
    /// unclassified composite `Word` tokens; the parser re-tags words by
    /// grammatical position.
    pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    #[inline]
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn remainder_from(&self, pos: usize) -> String {
        self.input.get(pos..).unwrap_or("").to_string()
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        while matches!(self.peek_char(), Some(' ' | '\t')) {
            self.chars.next();
        }

        let Some(&(pos, ch)) = self.chars.peek() else {
            return Ok(None);
        };

        match ch {
            // A '#' where a new token would begin starts a comment; inside
            // a word it is an ordinary word character.
            '#' => {
                while self.chars.next().is_some() {}
                Ok(None)
            }
            ';' | '&' => {
                self.chars.next();
                Ok(Some(Token::leaf(ch.to_string(), Span::new(pos, pos + 1), TokenKind::Punctuator)))
            }
            '|' => {
                self.chars.next();
                Ok(Some(Token::leaf("|", Span::new(pos, pos + 1), TokenKind::PipeOp)))
            }
            '>' => {
                self.chars.next();
                if self.peek_char() == Some('>') {
                    self.chars.next();
                    Ok(Some(Token::leaf(">>", Span::new(pos, pos + 2), TokenKind::IoRedirectOp)))
                } else {
                    Ok(Some(Token::leaf(">", Span::new(pos, pos + 1), TokenKind::IoRedirectOp)))
                }
            }
            _ => self.lex_word(pos).map(Some),
        }
    }

    /// Lex one composite word starting at `start`.
    fn lex_word(&mut self, start: usize) -> Result<Token, ParseError> {
        let mut parts: Vec<Token> = Vec::new();

        while let Some(&(pos, ch)) = self.chars.peek() {
            let part = match ch {
                '\\' => self.lex_escaped(pos)?,
                '\'' => self.lex_quoted(pos, '\'', QuoteKind::Single)?,
                '"' => self.lex_quoted(pos, '"', QuoteKind::Double)?,
                '`' => self.lex_quoted(pos, '`', QuoteKind::Backtick)?,
                c if is_word_char(c) => self.lex_unquoted(pos),
                c => {
                    if parts.is_empty() {
                        return Err(ParseError::UnexpectedChar {
                            ch: c,
                            pos,
                            remainder: self.remainder_from(pos),
                        });
                    }
                    break;
                }
            };
            parts.push(part);
        }

        // lex_word is only entered on a character that starts a part, so at
        // least one part was collected or an error was returned above.
        let span = parts
            .iter()
            .fold(None::<Span>, |acc, p| Some(acc.map_or(p.span, |s| s.merge(p.span))))
            .unwrap_or(Span::empty(start));
        Ok(Token::composite(span.slice(self.input), span, TokenKind::Word, parts))
    }

    /// Two-character `\c` escape. The backslash stays in the token text.
    fn lex_escaped(&mut self, start: usize) -> Result<Token, ParseError> {
        self.chars.next(); // consume backslash
        let Some((_, escaped)) = self.chars.next() else {
            return Err(ParseError::TrailingBackslash { pos: start });
        };
        let end = start + 1 + escaped.len_utf8();
        let span = Span::new(start, end);
        Ok(Token::leaf(span.slice(self.input), span, TokenKind::Escaped))
    }

    /// Run of plain word characters.
    fn lex_unquoted(&mut self, start: usize) -> Token {
        let mut end = start;
        while let Some(&(pos, ch)) = self.chars.peek() {
            if !is_word_char(ch) {
                break;
            }
            end = pos + ch.len_utf8();
            self.chars.next();
        }
        let span = Span::new(start, end);
        Token::leaf(span.slice(self.input), span, TokenKind::UnquotedWord)
    }

    /// Quoted segment, kept verbatim including the surrounding quotes.
    ///
    /// Double-quoted and backtick segments allow backslash to escape the
    /// closing quote; single-quoted segments are opaque.
    fn lex_quoted(&mut self, start: usize, quote: char, kind: QuoteKind) -> Result<Token, ParseError> {
        self.chars.next(); // consume opening quote
        let escapes = !matches!(kind, QuoteKind::Single);

        while let Some((pos, ch)) = self.chars.next() {
            if escapes && ch == '\\' {
                // Consume the escaped character, whatever it is.
                self.chars.next();
                continue;
            }
            if ch == quote {
                let span = Span::new(start, pos + ch.len_utf8());
                let token_kind = match kind {
                    QuoteKind::Single => TokenKind::SingleQuotedWord,
                    QuoteKind::Double => TokenKind::DoubleQuotedWord,
                    QuoteKind::Backtick => TokenKind::BacktickWord,
                };
                return Ok(Token::leaf(span.slice(self.input), span, token_kind));
            }
        }

        Err(ParseError::UnterminatedQuote {
            quote: kind,
            pos: start,
            remainder: self.remainder_from(start),
        })
    }
}

#[cfg(test)]
#[path = "lexer_tests/mod.rs"]
mod tests;
