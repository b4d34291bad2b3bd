// SPDX-License-Identifier: MIT

//! Execution error types.
//!
//! Every variant renders as the single-line message the runtime prints
//! (prefixed with `stash: `) when a line fails. All of them abort only the
//! current line, never the shell.

use thiserror::Error;

use crate::error::ParseError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Lexer/parser failure, including re-parses after history and alias
    /// rewriting.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A `!` event token did not resolve against the history.
    #[error("{tok}: event not found")]
    EventNotFound { tok: String },

    /// Malformed `${...}` or an empty redirect filename.
    #[error("{0}")]
    BadSubstitution(String),

    /// A word expanded to several fields where exactly one is required.
    #[error("multiple IO files: {fields}")]
    SingleExpansionRequired { fields: String },

    #[error("{0}: command not found")]
    FileNotFound(String),

    #[error("{0}: is a directory")]
    IsDirectory(String),

    #[error("{0}: not executable")]
    NotExecutable(String),

    /// Invariant violation inside the shell itself.
    #[error("internal error: {0}")]
    Internal(String),

    /// Cancel signal from the terminal.
    #[error("interrupted")]
    Interrupted,

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
