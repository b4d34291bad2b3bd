// SPDX-License-Identifier: MIT

//! Tests for the runtime: pipelines, state propagation, dispatch, errors.

use std::sync::Arc;

use super::*;
use crate::terminal::MemTerminal;

mod background;
mod basic;
mod errors;
mod interactive;
mod pipes;
mod redirections;
mod scripts;
mod variables;

/// A runtime rooted in a fresh temp directory with an in-memory terminal.
///
/// Scripts live under `<root>/bin`, which is the default `BIN_PATH`, so
/// nothing here depends on the process working directory unless a test
/// changes it (those are marked `#[serial]`).
pub(crate) struct Sandbox {
    pub root: tempfile::TempDir,
    pub term: Arc<MemTerminal>,
    pub rt: Arc<Runtime>,
}

impl Sandbox {
    pub(crate) fn new() -> Self {
        let root = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => panic!("cannot create sandbox: {e}"),
        };
        if let Err(e) = std::fs::create_dir_all(root.path().join("bin")) {
            panic!("cannot create sandbox bin: {e}");
        }
        let term = MemTerminal::new();
        let rt = Runtime::new(
            Config::default(),
            root.path().to_path_buf(),
            term.clone(),
            Registry::with_builtins(),
        );
        Self { root, term, rt }
    }

    /// Run one line to completion and return what reached the terminal.
    pub(crate) fn run(&self, line: &str) -> String {
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

    /// Drop a script into `<root>/bin`.
    pub(crate) fn write_script(&self, name: &str, content: &str) {
        let path = self.root.path().join("bin").join(name);
        if let Err(e) = std::fs::write(&path, content) {
            panic!("cannot write script {name}: {e}");
        }
    }

    /// Absolute path under the sandbox root, as a string.
    pub(crate) fn path(&self, rel: &str) -> String {
        self.root.path().join(rel).display().to_string()
    }
}
