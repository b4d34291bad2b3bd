// SPDX-License-Identifier: MIT

//! A plain stdin/stdout terminal.
//!
//! No line editing and no virtual keys; it satisfies the terminal contract
//! with buffered standard streams, which is all the core requires.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use stash_shell::Terminal;

#[derive(Default)]
pub struct StdTerminal {
    saw_eof: AtomicBool,
}

impl StdTerminal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Terminal for StdTerminal {
    fn write(&self, s: &str) {
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(s.as_bytes());
        let _ = out.flush();
    }

    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.saw_eof.store(true, Ordering::Release);
                None
            }
            Ok(_) => {
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                Some(line)
            }
        }
    }

    fn set_inp_line(&self, line: &str, _cursor_at: Option<usize>) {
        // Without a screen buffer the best we can do is show the text.
        self.write(line);
    }

    fn new_inp_line(&self, with_text: &str) {
        if !with_text.is_empty() {
            self.write(with_text);
        }
    }

    fn input_did_eof(&self) -> bool {
        self.saw_eof.load(Ordering::Acquire)
    }
}
