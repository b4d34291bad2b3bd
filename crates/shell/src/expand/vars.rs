// SPDX-License-Identifier: MIT

//! Variable and tilde expansion over plain text.

use crate::runtime::{RuntimeError, WorkerState};

/// Expand `$NAME`, `${NAME}`, and the special variables against a worker
/// frame.
///
/// `$NAME` consumes a maximal alphanumeric/underscore run; `${NAME}`
/// requires a non-empty name before `}`. `$1`..`$9`, `$@`, `$#` resolve
/// from the positional variables, `$?` from the frame's return value, and
/// `$$` from the worker id. Unknown names expand to the empty string; a
/// lone trailing `$` stays literal.
pub(crate) fn expand_vars(state: &WorkerState, s: &str) -> Result<String, RuntimeError> {
    enum Mode {
        Normal,
        Dollar,
        Brace,
    }

    let mut out = String::with_capacity(s.len());
    let mut varname = String::new();
    let mut mode = Mode::Normal;

    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        match mode {
            Mode::Normal => {
                if ch == '$' {
                    mode = Mode::Dollar;
                    varname.clear();
                } else {
                    out.push(ch);
                }
                i += 1;
            }
            Mode::Dollar if varname.is_empty() => {
                match ch {
                    '{' => mode = Mode::Brace,
                    '0'..='9' | '@' | '#' | '?' => {
                        out.push_str(&lookup_special(state, ch));
                        mode = Mode::Normal;
                    }
                    '$' => {
                        out.push_str(&state.worker_id.to_string());
                        mode = Mode::Normal;
                    }
                    c if c.is_ascii_alphabetic() || c == '_' => varname.push(c),
                    c => {
                        out.push('$');
                        out.push(c);
                        mode = Mode::Normal;
                    }
                }
                i += 1;
            }
            Mode::Dollar => {
                if ch.is_ascii_alphanumeric() || ch == '_' {
                    varname.push(ch);
                    i += 1;
                } else {
                    // Name ends here; re-process the terminator so that
                    // e.g. `$A$B` expands both variables.
                    out.push_str(lookup(state, &varname));
                    mode = Mode::Normal;
                }
            }
            Mode::Brace => {
                match ch {
                    '}' => {
                        if varname.is_empty() {
                            return Err(RuntimeError::BadSubstitution(format!(
                                "{s}: bad substitution"
                            )));
                        }
                        out.push_str(&lookup_braced(state, &varname));
                        mode = Mode::Normal;
                    }
                    c if c.is_ascii_alphanumeric() || c == '_' => varname.push(c),
                    _ => {
                        return Err(RuntimeError::BadSubstitution(format!(
                            "{s}: bad substitution"
                        )))
                    }
                }
                i += 1;
            }
        }
    }

    match mode {
        Mode::Normal => {}
        Mode::Dollar => {
            if varname.is_empty() {
                out.push('$');
            } else {
                out.push_str(lookup(state, &varname));
            }
        }
        Mode::Brace => {
            return Err(RuntimeError::BadSubstitution(format!("{s}: bad substitution")))
        }
    }

    Ok(out)
}

fn lookup<'a>(state: &'a WorkerState, name: &str) -> &'a str {
    state.env_get(name).unwrap_or("")
}

fn lookup_special(state: &WorkerState, ch: char) -> String {
    if ch == '?' {
        return state.return_value.to_string();
    }
    state.env_get(&ch.to_string()).unwrap_or("").to_string()
}

/// `${...}` accepts the special names too.
fn lookup_braced(state: &WorkerState, name: &str) -> String {
    if name == "?" {
        return state.return_value.to_string();
    }
    state.env_get(name).unwrap_or("").to_string()
}

/// Expand a leading `~` or `~user` against the frame's HOME.
///
/// Only the current user's name is recognised; anything else stays
/// literal.
pub(crate) fn expand_tilde(state: &WorkerState, s: &str) -> String {
    if !s.starts_with('~') {
        return s.to_string();
    }

    let slash = s.find('/');
    let prefix_end = slash.unwrap_or(s.len());
    let prefix = &s[1..prefix_end];
    let suffix = slash.map(|pos| &s[pos..]).unwrap_or("");

    if prefix.is_empty() {
        return format!("{}{suffix}", state.home().display());
    }
    if state.env_get("USER") == Some(prefix) {
        return format!("{}{suffix}", state.home().display());
    }
    s.to_string()
}

#[cfg(test)]
#[path = "../expand_tests/vars.rs"]
mod tests;
