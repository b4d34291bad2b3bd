// SPDX-License-Identifier: MIT

//! Parser: turns one lexed line into a classified flat token stream (for
//! the completer and the history/alias rewriter) and a pipe-sequence AST
//! (for the expander).

use crate::ast::{AssignmentAst, IoRedirectAst, PipeSequenceAst, RedirectOp, SimpleCommandAst};
use crate::error::{ParseError, QuoteKind};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{is_identifier, Token, TokenKind};

/// Both parser outputs for one line.
///
/// `tokens` is the flat stream in source order with words re-tagged by
/// grammatical position (`Cmd`, `AssignWord`, `Word`, `File`); `sequences`
/// is the structured form. Token start positions are monotonically
/// non-decreasing, and a punctuator is emitted exactly once (consecutive
/// punctuator tokens cannot occur).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub tokens: Vec<Token>,
    pub sequences: Vec<PipeSequenceAst>,
}

impl ParsedLine {
    /// Join all token texts with single spaces.
    ///
    /// Re-parsing the joined line yields an equivalent token stream; the
    /// expander uses this after history and alias rewriting.
    pub fn rejoin(&self) -> String {
        let texts: Vec<&str> = self.tokens.iter().map(|t| t.text.as_str()).collect();
        texts.join(" ")
    }
}

pub struct Parser;

impl Parser {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<ParsedLine, ParseError> {
        let raw = Lexer::tokenize(line)?;
        let mut state = ParserState { line, raw, pos: 0, tokens: Vec::new() };
        let sequences = state.parse_complete_command()?;
        Ok(ParsedLine { tokens: state.tokens, sequences })
    }

    /// Parse a string as if it were already inside double quotes.
    ///
    /// Returns the part tokens: escapes, backtick segments, and plain runs
    /// of everything else. Used by the expander for double-quoted segments.
    pub fn parse_within_dq(s: &str) -> Result<Vec<Token>, ParseError> {
        let mut parts = Vec::new();
        let mut chars = s.char_indices().peekable();

        while let Some(&(pos, ch)) = chars.peek() {
            match ch {
                '\\' => {
                    chars.next();
                    let Some((_, escaped)) = chars.next() else {
                        return Err(ParseError::TrailingBackslash { pos });
                    };
                    let span = Span::new(pos, pos + 1 + escaped.len_utf8());
                    parts.push(Token::leaf(span.slice(s), span, TokenKind::Escaped));
                }
                '`' => {
                    chars.next();
                    let mut closed = None;
                    while let Some((p, c)) = chars.next() {
                        if c == '\\' {
                            chars.next();
                            continue;
                        }
                        if c == '`' {
                            closed = Some(p + 1);
                            break;
                        }
                    }
                    let Some(end) = closed else {
                        return Err(ParseError::UnterminatedQuote {
                            quote: QuoteKind::Backtick,
                            pos,
                            remainder: s.get(pos..).unwrap_or("").to_string(),
                        });
                    };
                    let span = Span::new(pos, end);
                    parts.push(Token::leaf(span.slice(s), span, TokenKind::BacktickWord));
                }
                _ => {
                    let mut end = pos;
                    while let Some(&(p, c)) = chars.peek() {
                        if c == '\\' || c == '`' {
                            break;
                        }
                        end = p + c.len_utf8();
                        chars.next();
                    }
                    let span = Span::new(pos, end);
                    parts.push(Token::leaf(span.slice(s), span, TokenKind::UnquotedWord));
                }
            }
        }

        Ok(parts)
    }
}

struct ParserState<'a> {
    line: &'a str,
    raw: Vec<Token>,
    pos: usize,
    tokens: Vec<Token>,
}

impl ParserState<'_> {
    fn peek(&self) -> Option<&Token> {
        self.raw.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.raw.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn remainder_at(&self, span: Span) -> String {
        self.line.get(span.start..).unwrap_or("").to_string()
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(tok) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                pos: tok.span.start,
                remainder: self.remainder_at(tok.span),
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                pos: self.line.len(),
            },
        }
    }

    /// Grammar: `[ pipe_sequence ( punctuator pipe_sequence )* [punctuator] ]`
    fn parse_complete_command(&mut self) -> Result<Vec<PipeSequenceAst>, ParseError> {
        let mut sequences = Vec::new();
        if self.peek().is_none() {
            return Ok(sequences);
        }

        loop {
            if matches!(self.peek().map(|t| t.kind), Some(TokenKind::Punctuator)) {
                return Err(self.unexpected("a command"));
            }
            sequences.push(self.parse_pipe_sequence()?);

            match self.peek().map(|t| t.kind) {
                None => break,
                Some(TokenKind::Punctuator) => {
                    // `&` backgrounds the sequence it terminates.
                    let Some(punct) = self.advance() else { break };
                    if punct.text == "&" {
                        if let Some(seq) = sequences.last_mut() {
                            seq.in_background = true;
                        }
                    }
                    self.tokens.push(punct);
                    if self.peek().is_none() {
                        break;
                    }
                }
                Some(_) => return Err(self.unexpected("';', '&', or end of line")),
            }
        }

        Ok(sequences)
    }

    /// Grammar: `simple_command ( "|" simple_command )*`
    fn parse_pipe_sequence(&mut self) -> Result<PipeSequenceAst, ParseError> {
        let first = self.parse_simple_command()?;
        let mut span = first.span;
        let mut commands = vec![first];

        while matches!(self.peek().map(|t| t.kind), Some(TokenKind::PipeOp)) {
            if let Some(pipe) = self.advance() {
                self.tokens.push(pipe);
            }
            let next = self.parse_simple_command()?;
            span = span.merge(next.span);
            commands.push(next);
        }

        Ok(PipeSequenceAst { in_background: false, commands, span })
    }

    /// Grammar: `assignment_word+ [cmd_word] [cmd_suffix] | cmd_word [cmd_suffix]`
    fn parse_simple_command(&mut self) -> Result<SimpleCommandAst, ParseError> {
        let mut assignments = Vec::new();

        while let Some(tok) = self.peek() {
            if tok.kind != TokenKind::Word {
                break;
            }
            let Some((identifier, value)) = split_assignment(tok) else {
                break;
            };
            let span = tok.span;
            if let Some(word) = self.advance() {
                self.tokens.push(word.retag(TokenKind::AssignWord));
            }
            assignments.push(AssignmentAst { identifier, value, span });
        }

        let cmd_word = match self.peek() {
            Some(tok) if tok.kind == TokenKind::Word => {
                let word = self.advance().map(|t| t.retag(TokenKind::Cmd));
                if let Some(ref cmd) = word {
                    self.tokens.push(cmd.clone());
                }
                word
            }
            _ => None,
        };

        if assignments.is_empty() && cmd_word.is_none() {
            return Err(self.unexpected("a command"));
        }

        let mut span = assignments
            .first()
            .map(|a| a.span)
            .or(cmd_word.as_ref().map(|t| t.span))
            .unwrap_or(Span::empty(0));
        let mut args = Vec::new();
        let mut io_redirect: Option<IoRedirectAst> = None;

        while let Some(tok) = self.peek() {
            match tok.kind {
                TokenKind::Word => {
                    if io_redirect.is_some() {
                        return Err(self.unexpected("';', '&', '|', or end of line"));
                    }
                    if let Some(word) = self.advance() {
                        span = span.merge(word.span);
                        self.tokens.push(word.clone());
                        args.push(word);
                    }
                }
                TokenKind::IoRedirectOp => {
                    if io_redirect.is_some() {
                        return Err(self.unexpected("';', '&', '|', or end of line"));
                    }
                    let Some(op) = self.advance() else { break };
                    self.tokens.push(op.clone());
                    let operator = if op.text == ">>" {
                        RedirectOp::Append
                    } else {
                        RedirectOp::Truncate
                    };
                    match self.peek() {
                        Some(t) if t.kind == TokenKind::Word => {
                            let Some(file) = self.advance() else { break };
                            let file = file.retag(TokenKind::File);
                            self.tokens.push(file.clone());
                            span = span.merge(file.span);
                            io_redirect = Some(IoRedirectAst {
                                operator,
                                filename: file,
                                span: op.span.merge(span),
                            });
                        }
                        _ => return Err(self.unexpected("a filename")),
                    }
                }
                _ => break,
            }
        }

        Ok(SimpleCommandAst { assignments, cmd_word, args, io_redirect, span })
    }
}

/// Try to read a word token as `NAME=value`.
///
/// The name and `=` must sit in the leading unquoted part and the value must
/// be non-empty (a bare `NAME=` is an ordinary word, matching the grammar's
/// fallback). Returns the identifier and a word token covering the value.
fn split_assignment(tok: &Token) -> Option<(String, Token)> {
    let first = tok.parts.first()?;
    if first.kind != TokenKind::UnquotedWord {
        return None;
    }
    let eq = first.text.find('=')?;
    let identifier = &first.text[..eq];
    if !is_identifier(identifier) {
        return None;
    }

    let value_head = &first.text[eq + 1..];
    if value_head.is_empty() && tok.parts.len() == 1 {
        return None;
    }

    let mut parts = Vec::new();
    if !value_head.is_empty() {
        let span = Span::new(first.span.start + eq + 1, first.span.end);
        parts.push(Token::leaf(value_head, span, TokenKind::UnquotedWord));
    }
    parts.extend(tok.parts.iter().skip(1).cloned());

    let span = Span::new(first.span.start + eq + 1, tok.span.end);
    let text = tok.text.get(eq + 1..).unwrap_or("").to_string();
    Some((identifier.to_string(), Token::composite(text, span, TokenKind::Word, parts)))
}

#[cfg(test)]
#[path = "parser_tests/mod.rs"]
mod tests;
