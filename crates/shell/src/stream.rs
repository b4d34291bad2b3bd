// SPDX-License-Identifier: MIT

//! Byte-stream handles threaded through command execution.
//!
//! Commands never see files or the terminal directly; they read and write
//! [`Stream`] values. Pipe stages are linked with rewindable in-memory
//! buffers, redirects with open files, and the `&3` sentinel with the
//! process-level stdout/stderr.

use std::fs::File;
use std::io::{self, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::terminal::Terminal;

/// A rewindable in-memory text buffer with a read cursor.
#[derive(Debug, Default)]
pub struct MemBuf {
    data: String,
    read_pos: usize,
}

impl MemBuf {
    pub fn write_str(&mut self, s: &str) {
        self.data.push_str(s);
    }

    /// Read the next line, without its trailing newline. `None` at end.
    pub fn read_line(&mut self) -> Option<String> {
        if self.read_pos >= self.data.len() {
            return None;
        }
        let rest = &self.data[self.read_pos..];
        match rest.find('\n') {
            Some(idx) => {
                let line = rest[..idx].to_string();
                self.read_pos += idx + 1;
                Some(line)
            }
            None => {
                let line = rest.to_string();
                self.read_pos = self.data.len();
                Some(line)
            }
        }
    }

    /// Everything from the read cursor to the end.
    pub fn read_to_end(&mut self) -> String {
        let rest = self.data[self.read_pos..].to_string();
        self.read_pos = self.data.len();
        rest
    }

    /// Reset the read cursor to the start.
    pub fn rewind(&mut self) {
        self.read_pos = 0;
    }

    /// The full buffer contents, regardless of the read cursor.
    pub fn contents(&self) -> &str {
        &self.data
    }
}

/// A cloneable handle to one end of command I/O.
#[derive(Clone)]
pub enum Stream {
    /// The interactive terminal capability.
    Terminal(Arc<dyn Terminal>),
    /// Shared in-memory buffer.
    Memory(Arc<Mutex<MemBuf>>),
    /// Open file (redirect target).
    File(Arc<Mutex<File>>),
    /// Process-level stdout (the `&3` sentinel, background workers).
    Stdout,
    /// Process-level stderr.
    Stderr,
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stream::Terminal(_) => f.write_str("Stream::Terminal"),
            Stream::Memory(_) => f.write_str("Stream::Memory"),
            Stream::File(_) => f.write_str("Stream::File"),
            Stream::Stdout => f.write_str("Stream::Stdout"),
            Stream::Stderr => f.write_str("Stream::Stderr"),
        }
    }
}

impl Stream {
    /// Fresh empty in-memory stream.
    pub fn memory() -> Stream {
        Stream::Memory(Arc::new(Mutex::new(MemBuf::default())))
    }

    pub fn from_file(file: File) -> Stream {
        Stream::File(Arc::new(Mutex::new(file)))
    }

    pub fn is_memory(&self) -> bool {
        matches!(self, Stream::Memory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Stream::File(_))
    }

    pub fn write_str(&self, s: &str) -> io::Result<()> {
        match self {
            Stream::Terminal(term) => {
                term.write(s);
                Ok(())
            }
            Stream::Memory(buf) => {
                buf.lock().write_str(s);
                Ok(())
            }
            Stream::File(file) => file.lock().write_all(s.as_bytes()),
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(s.as_bytes())?;
                out.flush()
            }
            Stream::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(s.as_bytes())?;
                err.flush()
            }
        }
    }

    /// Read one line without its trailing newline; `None` on end of input.
    ///
    /// Process-level and file streams are write-only sinks here.
    pub fn read_line(&self) -> Option<String> {
        match self {
            Stream::Terminal(term) => term.read_line(),
            Stream::Memory(buf) => buf.lock().read_line(),
            Stream::File(_) | Stream::Stdout | Stream::Stderr => None,
        }
    }

    /// Read everything that remains. For terminals this drains line by line.
    pub fn read_to_end(&self) -> String {
        match self {
            Stream::Terminal(term) => {
                let mut all = String::new();
                while let Some(line) = term.read_line() {
                    all.push_str(&line);
                    all.push('\n');
                }
                all
            }
            Stream::Memory(buf) => buf.lock().read_to_end(),
            Stream::File(file) => {
                let mut all = String::new();
                let _ = file.lock().read_to_string(&mut all);
                all
            }
            Stream::Stdout | Stream::Stderr => String::new(),
        }
    }

    /// Rewind the read cursor (memory streams only; no-op otherwise).
    pub fn rewind(&self) {
        if let Stream::Memory(buf) = self {
            buf.lock().rewind();
        }
    }

    /// Snapshot of an in-memory stream's full contents.
    pub fn capture(&self) -> Option<String> {
        match self {
            Stream::Memory(buf) => Some(buf.lock().contents().to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
