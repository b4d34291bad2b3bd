// SPDX-License-Identifier: MIT

//! Parsed and expanded command shapes.
//!
//! The `*Ast` types are produced by the parser and still reference tokens;
//! the plain types are the fully expanded forms the runtime executes.

use std::fmt;

use crate::span::Span;
use crate::token::Token;

/// Redirect operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectOp {
    /// `>` truncates the target.
    Truncate,
    /// `>>` appends to the target.
    Append,
}

impl fmt::Display for RedirectOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RedirectOp::Truncate => ">",
            RedirectOp::Append => ">>",
        })
    }
}

/// `NAME=value` in command-prefix position, value still unexpanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentAst {
    pub identifier: String,
    /// The value as a word token (parts only cover the text after `=`).
    pub value: Token,
    pub span: Span,
}

/// Parsed `>`/`>>` with its unexpanded filename word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoRedirectAst {
    pub operator: RedirectOp,
    pub filename: Token,
    pub span: Span,
}

/// One stage of a pipe sequence before expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleCommandAst {
    pub assignments: Vec<AssignmentAst>,
    pub cmd_word: Option<Token>,
    pub args: Vec<Token>,
    pub io_redirect: Option<IoRedirectAst>,
    pub span: Span,
}

/// One `cmd | cmd | …` group before expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeSequenceAst {
    pub in_background: bool,
    pub commands: Vec<SimpleCommandAst>,
    pub span: Span,
}

/// Expanded `NAME=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub identifier: String,
    pub value: String,
}

/// Expanded redirect. Both stdout AND stderr go to the target; this is an
/// intentional deviation from POSIX.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoRedirect {
    pub operator: RedirectOp,
    pub filename: String,
}

/// Fully expanded stage of a pipe sequence, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimpleCommand {
    pub assignments: Vec<Assignment>,
    /// Command word; empty for a pure-assignment command.
    pub cmd_word: String,
    pub args: Vec<String>,
    pub io_redirect: Option<IoRedirect>,
}

/// Fully expanded pipe sequence, the atomic scheduling unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeSequence {
    pub in_background: bool,
    pub commands: Vec<SimpleCommand>,
}

#[cfg(test)]
#[path = "ast_tests.rs"]
mod tests;
