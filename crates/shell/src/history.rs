// SPDX-License-Identifier: MIT

//! Bounded command history with `!` event search and up/down navigation.
//!
//! Entries are newest-first. A secondary "alt" slot holds the interactive
//! history while a nested script runs, so scripts see their own empty
//! recent-history view; the slots swap back when the script exits.

use std::io::Write;
use std::path::Path;

use crate::runtime::RuntimeError;

pub struct History {
    /// Current slot, newest first.
    entries: Vec<String>,
    /// Swapped-out slot.
    alt: Vec<String>,
    swapped: bool,
    max: usize,
    /// −1 = live input line; 0.. = index into `entries`.
    idx: isize,
    /// The unfinished line captured when navigation leaves the live input.
    templine: String,
    /// Jump to the first entry matching the live prefix on first up-arrow.
    ipython_style_search: bool,
}

impl History {
    pub fn new(max: usize, ipython_style_search: bool) -> Self {
        Self {
            entries: Vec::new(),
            alt: Vec::new(),
            swapped: false,
            max,
            idx: -1,
            templine: String::new(),
            ipython_style_search,
        }
    }

    /// Load from a history file: one entry per line, oldest first.
    ///
    /// A missing or unreadable file leaves the history empty.
    pub fn load(&mut self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                self.entries = text.lines().rev().map(|l| l.trim().to_string()).collect();
                self.entries.truncate(self.max);
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no history file loaded");
            }
        }
    }

    /// Save to a history file, oldest first.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let mut file = std::fs::File::create(path)?;
        let ordered: Vec<&str> = self.interactive_entries().iter().rev().map(|s| s.as_str()).collect();
        file.write_all(ordered.join("\n").as_bytes())
    }

    /// Insert a line: blank lines and consecutive duplicates are skipped,
    /// and the store is trimmed to its bound.
    pub fn add(&mut self, line: &str) {
        let trimmed = line.trim();
        if !trimmed.is_empty() && self.entries.first().map(|s| s.as_str()) != Some(trimmed) {
            self.entries.insert(0, trimmed.to_string());
            self.entries.truncate(self.max);
        }
        self.reset_idx();
    }

    /// Resolve a `!` event token (leading `!` included).
    ///
    /// `!` alone and `!!` resolve to the latest entry, `!N` to the Nth
    /// entry counting from the oldest, `!prefix` to the first entry
    /// starting with the prefix.
    pub fn search(&self, tok: &str) -> Result<String, RuntimeError> {
        let pattern = tok.strip_prefix('!').unwrap_or(tok);
        if pattern.is_empty() || pattern == "!" {
            return match self.entries.first() {
                Some(latest) => Ok(latest.clone()),
                None => Err(RuntimeError::EventNotFound { tok: tok.to_string() }),
            };
        }
        if let Ok(n) = pattern.parse::<usize>() {
            return self
                .entries
                .iter()
                .rev()
                .nth(n)
                .cloned()
                .ok_or(RuntimeError::EventNotFound { tok: tok.to_string() });
        }
        self.entries
            .iter()
            .find(|entry| entry.starts_with(pattern))
            .cloned()
            .ok_or(RuntimeError::EventNotFound { tok: tok.to_string() })
    }

    /// Swap the primary and alt slots around nested script execution.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.entries, &mut self.alt);
        self.swapped = !self.swapped;
    }

    /// The current slot, newest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The interactive view, regardless of the current swap state.
    pub fn interactive_entries(&self) -> &[String] {
        if self.swapped {
            &self.alt
        } else {
            &self.entries
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walk up (toward older entries). Returns the line to display, or
    /// `None` when already at the oldest entry.
    pub fn up(&mut self, live_line: &str) -> Option<String> {
        if self.idx == -1 {
            self.templine = live_line.trim_end().to_string();
        }

        self.idx += 1;
        let len = self.entries.len() as isize;
        if self.idx >= len {
            self.idx = len - 1;
            return None;
        }

        let mut entry = self.entries[self.idx as usize].clone();
        if self.idx == 0 && self.ipython_style_search && !self.templine.is_empty() {
            for (i, candidate) in self.entries.iter().enumerate() {
                if candidate.starts_with(&self.templine) {
                    entry = candidate.clone();
                    self.idx = i as isize;
                    break;
                }
            }
        }
        Some(entry)
    }

    /// Walk down (toward the live input). Returns the line to display, or
    /// `None` when already on the live input.
    pub fn down(&mut self) -> Option<String> {
        self.idx -= 1;
        if self.idx < -1 {
            self.idx = -1;
            return None;
        }
        if self.idx == -1 {
            return Some(self.templine.clone());
        }
        Some(self.entries[self.idx as usize].clone())
    }

    pub fn reset_idx(&mut self) {
        self.idx = -1;
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
