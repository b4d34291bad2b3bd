// SPDX-License-Identifier: MIT

//! Registry of in-process commands.
//!
//! Commands that the original system loaded as script modules are held here
//! as an explicit `name → handle` table owned by the shell. The embedding
//! application may register additional commands; bare command words resolve
//! against the registry before the filesystem.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use super::Runtime;
use crate::stream::Stream;
use crate::runtime::WorkerState;

/// Everything a command invocation sees.
pub struct Invocation<'a> {
    pub rt: &'a Runtime,
    /// `argv[0]` is the command name.
    pub argv: Vec<String>,
    /// Frame environment merged with the stage's prefix assignments.
    pub environ: HashMap<String, String>,
    /// The worker frame, mutable for `cd`, `alias`, and friends.
    pub state: &'a mut WorkerState,
    pub ins: Stream,
    pub outs: Stream,
    pub errs: Stream,
}

impl Invocation<'_> {
    /// Arguments after `argv[0]`.
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }

    /// Report a command-level failure on the error stream.
    pub fn fail(&self, message: &str) -> i32 {
        let name = self.argv.first().map(|s| s.as_str()).unwrap_or("?");
        let _ = self.errs.write_str(&format!("{name}: {message}\n"));
        1
    }
}

/// An in-process command.
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    /// Execute and return the exit code.
    fn run(&self, ctx: &mut Invocation<'_>) -> i32;
}

/// Insertion-ordered command table.
#[derive(Default, Clone)]
pub struct Registry {
    commands: IndexMap<String, Arc<dyn Command>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bootstrap command set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for command in super::builtins::all() {
            registry.register(command);
        }
        registry
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.insert(command.name().to_string(), command);
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
