// SPDX-License-Identifier: MIT

//! Shared harness for the behavior specs.

use std::sync::Arc;

use stash_shell::{Config, MemTerminal, Registry, RunOptions, Runtime};

/// A shell rooted in a fresh temp directory, driven through the public API
/// with an in-memory terminal.
pub struct Shell {
    pub root: tempfile::TempDir,
    pub term: Arc<MemTerminal>,
    pub rt: Arc<Runtime>,
}

impl Shell {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let root = tempfile::tempdir().expect("create shell root");
        std::fs::create_dir_all(root.path().join("bin")).expect("create bin dir");
        let term = MemTerminal::new();
        let rt = Runtime::new(config, root.path().to_path_buf(), term.clone(), Registry::with_builtins());
        Self { root, term, rt }
    }

    /// Run one line to completion; returns everything the terminal saw.
    pub fn run(&self, line: &str) -> String {
        self.rt
            .run(
                vec![line.to_string()],
                RunOptions { add_new_inp_line: Some(false), ..RunOptions::default() },
            )
            .join();
        let output = self.term.output();
        self.term.clear_output();
        output
    }

    /// Absolute path under the shell root.
    pub fn path(&self, rel: &str) -> String {
        self.root.path().join(rel).display().to_string()
    }

    pub fn write_file(&self, rel: &str, content: &str) -> String {
        let path = self.root.path().join(rel);
        std::fs::write(&path, content).expect("write file");
        path.display().to_string()
    }

    pub fn read_file(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root.path().join(rel)).expect("read file")
    }
}
