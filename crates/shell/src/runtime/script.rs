// SPDX-License-Identifier: MIT

//! Script file resolution and dispatch.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::RuntimeError;
use super::state::WorkerState;
use super::{RunOptions, Runtime};
use crate::stream::Stream;

/// Resolve a command word to a script file.
///
/// Probes the word itself and `word.sh` as paths, then scans the current
/// directory followed by each `BIN_PATH` entry for `name` or `name.sh`. A
/// match that is only a directory fails with `IsDirectory`; no match at all
/// is `FileNotFound`.
pub(crate) fn find_script_file(state: &WorkerState, name: &str) -> Result<PathBuf, RuntimeError> {
    let mut dir_match_found = false;

    for candidate in [name.to_string(), format!("{name}.sh")] {
        let path = Path::new(&candidate);
        if path.exists() {
            if path.is_dir() {
                dir_match_found = true;
            } else {
                return Ok(path.to_path_buf());
            }
        }
    }

    // The current directory is effectively always the first BIN_PATH entry.
    let bin_path = state.env_get("BIN_PATH").unwrap_or("");
    let home = state.home();
    for dir in std::iter::once(".").chain(bin_path.split(':')) {
        if dir.is_empty() {
            continue;
        }
        let dir = expand_tilde_path(dir, &home);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if file_name == name || file_name == format!("{name}.sh") {
                let path = entry.path();
                if path.is_dir() {
                    dir_match_found = true;
                } else {
                    tracing::debug!(command = name, script = %path.display(), "resolved script");
                    return Ok(path);
                }
            }
        }
    }

    if dir_match_found {
        Err(RuntimeError::IsDirectory(name.to_string()))
    } else {
        Err(RuntimeError::FileNotFound(name.to_string()))
    }
}

/// All runnable script names under `["."] + BIN_PATH`, spaces escaped.
///
/// Used by the completer.
pub(crate) fn all_script_names(state: &WorkerState) -> Vec<String> {
    let mut names = Vec::new();
    let bin_path = state.env_get("BIN_PATH").unwrap_or("");
    let home = state.home();
    for dir in std::iter::once(".").chain(bin_path.split(':')) {
        if dir.is_empty() {
            continue;
        }
        let dir = expand_tilde_path(dir, &home);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if let Some(file_name) = entry.file_name().to_str() {
                if file_name.ends_with(".sh") {
                    names.push(file_name.replace(' ', "\\ "));
                }
            }
        }
    }
    names
}

fn expand_tilde_path(dir: &str, home: &Path) -> PathBuf {
    if dir == "~" {
        home.to_path_buf()
    } else if let Some(rest) = dir.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(dir)
    }
}

/// Sniff the first 512 bytes: any byte above 126, or any control byte other
/// than tab/LF/CR, marks the file as binary.
pub(crate) fn is_binary_file(path: &Path) -> Result<bool, RuntimeError> {
    let mut file = std::fs::File::open(path).map_err(|source| RuntimeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut buf = [0u8; 512];
    let n = file.read(&mut buf).map_err(|source| RuntimeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(buf[..n].iter().any(|&b| b > 126 || (b < 32 && !matches!(b, 9 | 10 | 13))))
}

/// Run a shell script in a nested, non-persistent worker.
///
/// Positional variables are handed to the child through the frame's
/// enclosing set: `$0..$n`, `$#`, and `$@` (tab-joined).
pub(crate) fn exec_sh_file(
    rt: &Arc<Runtime>,
    frame: &Arc<Mutex<WorkerState>>,
    path: &Path,
    args: &[String],
    ins: Stream,
    outs: Stream,
    errs: Stream,
) -> Result<i32, RuntimeError> {
    let text = std::fs::read_to_string(path).map_err(|source| RuntimeError::Io {
        path: path.display().to_string(),
        source,
    })?;

    {
        let mut state = frame.lock();
        state.enclosing_environ.insert("0".to_string(), path.display().to_string());
        for (i, arg) in args.iter().enumerate() {
            state.enclosing_environ.insert((i + 1).to_string(), arg.clone());
        }
        state.enclosing_environ.insert("#".to_string(), args.len().to_string());
        state.enclosing_environ.insert("@".to_string(), args.join("\t"));
    }

    let lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();
    let worker = rt.run(
        lines,
        RunOptions {
            final_ins: Some(ins),
            final_outs: Some(outs),
            final_errs: Some(errs),
            add_to_history: None,
            add_new_inp_line: Some(false),
            persistent: false,
        },
    );
    worker.join();

    Ok(frame.lock().return_value)
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
