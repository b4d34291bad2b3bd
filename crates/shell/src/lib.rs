// SPDX-License-Identifier: MIT

//! Core of an interactive, POSIX-lite shell.
//!
//! Four tightly coupled subsystems: the lexer/parser (typed token stream
//! and simple-command AST), the expander (history, alias, variable, quote,
//! command-substitution, and glob expansion), the runtime (pipelines of
//! in-process commands and shell scripts under a nested worker stack), and
//! the history store. The completer and the terminal capability round out
//! the interactive surface; the terminal UI itself lives outside this
//! crate.
//!
//! ```no_run
//! use std::sync::Arc;
//! use stash_shell::{Config, MemTerminal, Registry, Runtime};
//!
//! let terminal = MemTerminal::with_input(&[]);
//! let rt = Runtime::new(
//!     Config::default(),
//!     std::path::PathBuf::from("/tmp/stash"),
//!     terminal.clone(),
//!     Registry::with_builtins(),
//! );
//! rt.load_rcfile();
//! rt.run_line("echo hello | cat").join();
//! ```

pub mod ast;
pub mod complete;
pub mod config;
pub mod error;
pub mod expand;
pub mod history;
mod lexer;
pub mod parser;
pub mod runtime;
pub mod span;
pub mod stream;
pub mod terminal;
pub mod token;

pub use ast::{Assignment, IoRedirect, PipeSequence, RedirectOp, SimpleCommand};
pub use complete::{Completion, SubCompleter};
pub use config::{Config, ConfigError};
pub use error::ParseError;
pub use expand::Expansion;
pub use history::History;
pub use parser::{ParsedLine, Parser};
pub use runtime::{Command, Invocation, Registry, RunOptions, Runtime, RuntimeError, Worker, WorkerState};
pub use span::Span;
pub use stream::{MemBuf, Stream};
pub use terminal::{MemTerminal, Terminal};
pub use token::{Token, TokenKind};
