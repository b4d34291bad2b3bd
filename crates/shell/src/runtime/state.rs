// SPDX-License-Identifier: MIT

//! Per-worker execution state and the process-cwd authority.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::stream::Stream;

/// The process working directory is the one OS-global resource that leaks
/// across worker frames; every change goes through this lock.
static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Move the process working directory, if it differs from `target`.
pub(crate) fn enter_cwd(target: &Path) -> std::io::Result<()> {
    let _guard = CWD_LOCK.lock();
    if std::env::current_dir().ok().as_deref() == Some(target) {
        return Ok(());
    }
    std::env::set_current_dir(target)
}

/// One frame of the worker stack.
///
/// A frame is pushed when a worker starts and popped when it finishes; its
/// lines and pipe sequences all share it, so an assignment made by an early
/// sequence is visible to later ones.
#[derive(Debug, Clone)]
pub struct WorkerState {
    pub environ: HashMap<String, String>,
    /// Aliases keep insertion order for listing and completion.
    pub aliases: IndexMap<String, String>,
    pub cwd: PathBuf,
    /// Working directory at frame creation; restored on non-persistent pop.
    pub enclosed_cwd: PathBuf,
    /// Per-command prefix assignments (`A=42 cmd`), reset for each stage.
    pub enclosing_environ: HashMap<String, String>,
    pub sys_stdin: Stream,
    pub sys_stdout: Stream,
    pub sys_stderr: Stream,
    /// `$?`.
    pub return_value: i32,
    /// `$$`.
    pub worker_id: u64,
}

impl WorkerState {
    pub(crate) fn new(
        environ: HashMap<String, String>,
        cwd: PathBuf,
        stdin: Stream,
        stdout: Stream,
        stderr: Stream,
    ) -> Self {
        Self {
            environ,
            aliases: IndexMap::new(),
            enclosed_cwd: cwd.clone(),
            cwd,
            enclosing_environ: HashMap::new(),
            sys_stdin: stdin,
            sys_stdout: stdout,
            sys_stderr: stderr,
            return_value: 0,
            worker_id: 0,
        }
    }

    /// Derive a child frame.
    ///
    /// The child's environment is the parent's plus the parent's pending
    /// enclosing assignments (positional variables for a script, prefix
    /// assignments for a command); the parent's pending set is consumed.
    pub(crate) fn child_of(parent: &mut WorkerState, worker_id: u64) -> WorkerState {
        let mut environ = parent.environ.clone();
        environ.extend(std::mem::take(&mut parent.enclosing_environ));
        WorkerState {
            environ,
            aliases: parent.aliases.clone(),
            cwd: parent.cwd.clone(),
            enclosed_cwd: parent.cwd.clone(),
            enclosing_environ: HashMap::new(),
            sys_stdin: parent.sys_stdin.clone(),
            sys_stdout: parent.sys_stdout.clone(),
            sys_stderr: parent.sys_stderr.clone(),
            return_value: parent.return_value,
            worker_id,
        }
    }

    /// Copy a finished child's environment, aliases, and cwd back into this
    /// frame (top-level or persistent pop).
    pub(crate) fn absorb(&mut self, child: &WorkerState) {
        self.environ = child.environ.clone();
        self.aliases = child.aliases.clone();
        self.cwd = child.cwd.clone();
    }

    pub fn env_get(&self, name: &str) -> Option<&str> {
        self.environ.get(name).map(|s| s.as_str())
    }

    /// `$HOME`, falling back to the OS notion for odd environments.
    pub fn home(&self) -> PathBuf {
        self.env_get("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"))
    }

    /// Change this frame's directory and the process directory with it.
    pub fn change_cwd(&mut self, target: &Path) -> std::io::Result<()> {
        let resolved = if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.cwd.join(target)
        };
        let resolved = resolved.canonicalize()?;
        enter_cwd(&resolved)?;
        self.cwd = resolved;
        Ok(())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
