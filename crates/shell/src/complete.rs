// SPDX-License-Identifier: MIT

//! Tab completion, invoked by the terminal.
//!
//! Parses the line, finds the token under the cursor, and completes from
//! paths, script and builtin names, aliases, and environment variables. A
//! pluggable subcommand completer may override or extend the candidates.

use std::path::Path;

use crate::error::ParseError;
use crate::expand::expand_vars;
use crate::parser::Parser;
use crate::runtime::{Runtime, WorkerState};
use crate::terminal::Terminal;
use crate::token::TokenKind;

/// External subcommand completer, e.g. for a tool that knows its own
/// subcommands. `toks` holds the words of the current pipe stage with the
/// word under the cursor last.
pub trait SubCompleter: Send + Sync {
    /// Returns the candidate override and whether normal completion should
    /// still contribute.
    fn complete(&self, toks: &[String]) -> (Option<Vec<String>>, bool);
}

/// Outcome of one completion request. The terminal has already been
/// updated; this is returned for callers that render differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The line was extended; the terminal input line was replaced.
    Replaced { line: String, cursor_at: usize },
    /// Nothing extends the line; all candidates were displayed.
    Candidates { line: String, cursor_at: usize, names: Vec<String> },
    /// Over the display cap; only a notice was shown.
    TooMany { line: String, cursor_at: usize, count: usize },
    /// No candidates at all; the line is untouched.
    NoMatch { line: String, cursor_at: usize },
    /// The line does not parse; a message was printed.
    Invalid { line: String, error: ParseError },
}

pub(crate) fn complete(rt: &Runtime, line: &str, cursor_at: Option<usize>) -> Completion {
    let terminal = rt.terminal();
    let cursor = cursor_at.unwrap_or(line.len()).min(line.len());

    let parsed = match Parser::parse(line) {
        Ok(parsed) => parsed,
        Err(error) => {
            terminal.write("\n");
            terminal.write_with_prefix(&format!("{error}\n"));
            terminal.new_inp_line(line);
            return Completion::Invalid { line: line.to_string(), error };
        }
    };

    // Locate the token under the cursor; `toks` collects the words of the
    // current pipe stage for the subcommand completer.
    let mut toks: Vec<String> = Vec::new();
    let mut is_cmd_word = true;
    let mut word_to_complete = String::new();
    let mut replace_range = (cursor, cursor);

    for token in &parsed.tokens {
        if token.kind == TokenKind::Cmd {
            toks.clear();
            is_cmd_word = true;
        }
        if token.span.touches(cursor) {
            word_to_complete = token.text[..cursor - token.span.start].to_string();
            replace_range = (token.span.start, cursor);
            break;
        }
        toks.push(token.text.clone());
        is_cmd_word = false;
    }
    toks.push(word_to_complete.clone());

    let state = rt.state_snapshot();

    let (override_names, with_normal_completion) = match rt.sub_completer() {
        Some(completer) => completer.complete(&toks),
        None => (None, true),
    };

    let mut all_names: Vec<String> = match override_names {
        Some(names) if !with_normal_completion => names,
        Some(mut names) => {
            names.extend(normal_candidates(rt, &state, &word_to_complete, is_cmd_word));
            names
        }
        None => normal_candidates(rt, &state, &word_to_complete, is_cmd_word),
    };

    all_names.sort();
    all_names.dedup();

    let np_max = rt.auto_completion_max();
    if all_names.len() > np_max {
        terminal.write(&format!("\nMore than {np_max} possibilities\n"));
        terminal.new_inp_line(line);
        return Completion::TooMany {
            line: line.to_string(),
            cursor_at: cursor,
            count: all_names.len(),
        };
    }

    let prefix = common_prefix(&all_names);
    let mut newline = line.to_string();
    let mut new_cursor = cursor;
    if !prefix.is_empty() {
        let mut prefix = prefix;
        if all_names.len() == 1 && !prefix.ends_with('/') {
            prefix.push(' ');
        }
        newline = format!("{}{}{}", &line[..replace_range.0], prefix, &line[replace_range.1..]);
        new_cursor = (cursor + prefix.len()).saturating_sub(replace_range.1 - replace_range.0);
    }

    if newline != line {
        terminal.set_inp_line(&newline, Some(new_cursor));
        Completion::Replaced { line: newline, cursor_at: new_cursor }
    } else if !all_names.is_empty() {
        terminal.write(&format!("\n{}", format_all_names(&all_names)));
        terminal.new_inp_line(line);
        Completion::Candidates {
            line: line.to_string(),
            cursor_at: cursor,
            names: all_names,
        }
    } else {
        Completion::NoMatch { line: line.to_string(), cursor_at: cursor }
    }
}

fn normal_candidates(
    rt: &Runtime,
    state: &WorkerState,
    word_to_complete: &str,
    is_cmd_word: bool,
) -> Vec<String> {
    let mut path_names = path_match(state, word_to_complete);

    let script_names = if is_cmd_word {
        // Command position: directories and scripts only, plus everything
        // runnable by name.
        path_names.retain(|p| p.ends_with('/') || p.ends_with(".sh"));
        let mut names = rt.all_script_names();
        names.extend(rt.registry().names().map(String::from));
        names.extend(state.aliases.keys().cloned());
        if !word_to_complete.is_empty() {
            names.retain(|n| n.starts_with(word_to_complete));
        }
        names
    } else {
        Vec::new()
    };

    let envar_names: Vec<String> = match word_to_complete.strip_prefix('$') {
        Some(rest) => state
            .environ
            .keys()
            .filter(|name| name.starts_with(rest))
            .map(|name| format!("${name}"))
            .collect(),
        None => Vec::new(),
    };

    let mut all = path_names;
    all.extend(envar_names);
    all.extend(script_names);
    all
}

/// Filesystem candidates for a partial word.
fn path_match(state: &WorkerState, word_to_complete: &str) -> Vec<String> {
    // Path probing dislikes escaped whitespace.
    let normal_whites = word_to_complete.replace("\\ ", " ");
    let mut full_path = crate::expand::expand_tilde(state, &normal_whites);

    // Recognise paths with an embedded variable, e.g. `$STASH_ROOT/`.
    if !dirname(&normal_whites).is_empty() {
        if let Ok(expanded) = expand_vars(state, &full_path) {
            if expanded != full_path && !expanded.is_empty() {
                full_path = expanded;
            }
        }
    }

    let mut names = Vec::new();
    let word_dir = dirname(word_to_complete);

    if full_path.ends_with('/') && Path::new(&full_path).is_dir() {
        if let Ok(entries) = std::fs::read_dir(&full_path) {
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    let mut name = name.to_string();
                    if entry.path().is_dir() {
                        name.push('/');
                    }
                    names.push(join_path(word_dir, &name.replace(' ', "\\ ")));
                }
            }
        }
    } else {
        let dir = {
            let d = dirname(&full_path);
            if d.is_empty() {
                ".".to_string()
            } else {
                d.to_string()
            }
        };
        let stem = basename(&full_path);
        if let Ok(entries) = std::fs::read_dir(&dir) {
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    if name.starts_with(stem) {
                        let mut name = name.to_string();
                        if entry.path().is_dir() {
                            name.push('/');
                        }
                        names.push(join_path(word_dir, &name.replace(' ', "\\ ")));
                    }
                }
            }
        }
    }

    names
}

/// Only the last component of each candidate is displayed.
fn format_all_names(all_names: &[String]) -> String {
    let shown: Vec<String> = all_names
        .iter()
        .map(|name| {
            if name.ends_with('/') {
                format!("{}/", basename(dirname(name)))
            } else {
                basename(name).to_string()
            }
        })
        .collect();
    format!("{}\n", shown.join("  "))
}

fn common_prefix(names: &[String]) -> String {
    let Some(first) = names.first() else {
        return String::new();
    };
    let mut end = first.len();
    for name in &names[1..] {
        let mut common = 0;
        for ((i, a), b) in first[..end].char_indices().zip(name.chars()) {
            if a != b {
                break;
            }
            common = i + a.len_utf8();
        }
        end = end.min(common);
        if end == 0 {
            return String::new();
        }
    }
    first[..end].to_string()
}

fn dirname(s: &str) -> &str {
    match s.rfind('/') {
        Some(0) => "/",
        Some(i) => &s[..i],
        None => "",
    }
}

fn basename(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or(s)
}

fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

#[cfg(test)]
#[path = "complete_tests.rs"]
mod tests;
