// SPDX-License-Identifier: MIT

//! Tests for the line lexer.

use crate::error::{ParseError, QuoteKind};
use crate::lexer::Lexer;
use crate::token::TokenKind;

#[macro_use]
mod macros;

mod basic;
mod errors;
mod quoting;
