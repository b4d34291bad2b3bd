// SPDX-License-Identifier: MIT

//! The terminal capability consumed by the core.
//!
//! The actual UI lives outside this crate; the runtime, expander, and
//! completer talk only to this trait. Any implementation is admissible —
//! the CLI wraps stdin/stdout, the tests use [`MemTerminal`].

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

/// Byte-oriented terminal collaborator.
pub trait Terminal: Send + Sync {
    /// Append text to the terminal output.
    fn write(&self, s: &str);

    /// Write a runtime message, prefixed so the user can tell shell
    /// diagnostics from command output.
    fn write_with_prefix(&self, s: &str) {
        self.write(&format!("stash: {s}"));
    }

    /// Block until the user finishes a line. `None` signals end of input.
    fn read_line(&self) -> Option<String>;

    /// The current (unsubmitted) input line, used by history navigation.
    fn read_inp_line(&self) -> String {
        String::new()
    }

    /// Replace the current input line, optionally placing the cursor.
    fn set_inp_line(&self, line: &str, cursor_at: Option<usize>);

    /// Start a fresh input line, pre-filled with `with_text`.
    fn new_inp_line(&self, with_text: &str);

    /// Move the cursor by `offset` from `whence` (0 = start, 1 = current,
    /// 2 = end). Line-oriented terminals may ignore this.
    fn set_cursor(&self, _offset: i64, _whence: i32) {}

    fn flush(&self) {}

    fn input_did_return(&self) -> bool {
        false
    }

    fn input_did_eof(&self) -> bool {
        false
    }

    fn input_did_interrupt(&self) -> bool {
        false
    }
}

/// Scripted in-memory terminal.
///
/// Feeds queued lines to `read_line` and records everything written; used
/// by the test suites and by embedders that drive the shell headless.
#[derive(Default)]
pub struct MemTerminal {
    input: Mutex<VecDeque<String>>,
    output: Mutex<String>,
    inp_line: Mutex<String>,
}

impl MemTerminal {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_input(lines: &[&str]) -> Arc<Self> {
        let term = Self::default();
        term.input.lock().extend(lines.iter().map(|s| s.to_string()));
        Arc::new(term)
    }

    pub fn push_input(&self, line: &str) {
        self.input.lock().push_back(line.to_string());
    }

    /// Everything written so far.
    pub fn output(&self) -> String {
        self.output.lock().clone()
    }

    pub fn clear_output(&self) {
        self.output.lock().clear();
    }

    /// The current input line as last set by `set_inp_line`/`new_inp_line`.
    pub fn inp_line(&self) -> String {
        self.inp_line.lock().clone()
    }
}

impl Terminal for MemTerminal {
    fn write(&self, s: &str) {
        self.output.lock().push_str(s);
    }

    fn read_line(&self) -> Option<String> {
        self.input.lock().pop_front()
    }

    fn read_inp_line(&self) -> String {
        self.inp_line.lock().clone()
    }

    fn set_inp_line(&self, line: &str, _cursor_at: Option<usize>) {
        *self.inp_line.lock() = line.to_string();
    }

    fn new_inp_line(&self, with_text: &str) {
        *self.inp_line.lock() = with_text.to_string();
    }

    fn input_did_eof(&self) -> bool {
        self.input.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "terminal_tests.rs"]
mod tests;
