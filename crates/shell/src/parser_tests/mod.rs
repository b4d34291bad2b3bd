// SPDX-License-Identifier: MIT

//! Tests for the parser.

use crate::ast::RedirectOp;
use crate::error::ParseError;
use crate::parser::{ParsedLine, Parser};
use crate::token::TokenKind;

mod errors;
mod properties;
mod sequences;
mod simple_cmd;
mod within_dq;

/// Parse, panicking with the input on failure.
fn parse(input: &str) -> ParsedLine {
    match Parser::parse(input) {
        Ok(parsed) => parsed,
        Err(e) => panic!("failed to parse {input:?}: {e}"),
    }
}

/// Kinds of the flat token stream.
fn kinds(parsed: &ParsedLine) -> Vec<TokenKind> {
    parsed.tokens.iter().map(|t| t.kind).collect()
}
