// SPDX-License-Identifier: MIT

//! Word expansion: one word token in, one or more expansion fields out.
//!
//! Two parallel accumulators are kept per field: `raw` (the final string)
//! and `globbable` (the same content with wildcards from quoted or escaped
//! segments bracket-quoted so globbing treats them literally). After all
//! parts are assembled, each field's globbable form is matched against the
//! filesystem; matches replace the field, otherwise the raw form is kept.

use std::sync::Arc;

use parking_lot::Mutex;

use super::vars::{expand_tilde, expand_vars};
use crate::parser::Parser;
use crate::runtime::{RunOptions, Runtime, RuntimeError, WorkerState};
use crate::stream::Stream;
use crate::token::{Token, TokenKind};

pub(crate) struct ExpandCtx<'a> {
    pub rt: &'a Arc<Runtime>,
    pub frame: &'a Arc<Mutex<WorkerState>>,
}

impl ExpandCtx<'_> {
    fn with_state<R>(&self, f: impl FnOnce(&WorkerState) -> R) -> R {
        let state = self.frame.lock();
        f(&state)
    }
}

/// Expand one composite word into its fields.
pub(crate) fn expand_word(ctx: &ExpandCtx<'_>, word: &Token) -> Result<Vec<String>, RuntimeError> {
    let mut raw_fields: Vec<String> = Vec::new();
    let mut glob_fields: Vec<String> = Vec::new();
    let mut w_raw = String::new();
    let mut w_glob = String::new();

    for (i, part) in word.parts.iter().enumerate() {
        let (ex, exg) = match part.kind {
            TokenKind::Escaped => expand_escaped(&part.text),
            TokenKind::UnquotedWord => {
                let expanded = ctx.with_state(|st| {
                    let text = if i == 0 {
                        // Tilde applies only to the word's first part.
                        expand_tilde(st, &part.text)
                    } else {
                        part.text.clone()
                    };
                    expand_vars(st, &text)
                })?;
                (expanded.clone(), expanded)
            }
            TokenKind::SingleQuotedWord => {
                let inner = strip_quotes(&part.text);
                (inner.to_string(), escape_wildcards(inner))
            }
            TokenKind::DoubleQuotedWord => expand_dq(ctx, strip_quotes(&part.text))?,
            TokenKind::BacktickWord => {
                let output = command_substitute(ctx, strip_quotes(&part.text))?;
                let fields: Vec<&str> = output.split_whitespace().collect();
                if fields.len() > 1 {
                    // Extra fields split the word at the insertion point.
                    let first = fields.first().copied().unwrap_or("");
                    let last = fields.last().copied().unwrap_or("");
                    raw_fields.push(format!("{w_raw}{first}"));
                    glob_fields.push(format!("{w_glob}{first}"));
                    for field in &fields[1..fields.len() - 1] {
                        raw_fields.push(field.to_string());
                        glob_fields.push(field.to_string());
                    }
                    w_raw.clear();
                    w_glob.clear();
                    (last.to_string(), last.to_string())
                } else {
                    (output.clone(), output)
                }
            }
            kind => {
                return Err(RuntimeError::Internal(format!("{kind}: unexpected word part")));
            }
        };
        w_raw.push_str(&ex);
        w_glob.push_str(&exg);
    }

    raw_fields.push(w_raw);
    glob_fields.push(w_glob);
    debug_assert_eq!(raw_fields.len(), glob_fields.len());

    let mut fields = Vec::with_capacity(raw_fields.len());
    for (raw, globbable) in raw_fields.into_iter().zip(glob_fields) {
        let matches = glob_matches(&globbable);
        if matches.is_empty() {
            fields.push(raw);
        } else {
            fields.extend(matches);
        }
    }
    Ok(fields)
}

/// `\c`: the translation shortlist, with wildcards kept literal but
/// bracket-quoted for globbing.
fn expand_escaped(text: &str) -> (String, String) {
    let c = text.chars().nth(1).unwrap_or('\\');
    match c {
        't' => ("\t".to_string(), "\t".to_string()),
        'r' => ("\r".to_string(), "\r".to_string()),
        'n' => ("\n".to_string(), "\n".to_string()),
        '[' | ']' | '?' | '*' => (c.to_string(), format!("[{c}]")),
        _ => (c.to_string(), c.to_string()),
    }
}

/// Double-quoted segment: re-parse the interior and expand without tilde
/// or glob; wildcards in the result are bracket-quoted.
fn expand_dq(ctx: &ExpandCtx<'_>, inner: &str) -> Result<(String, String), RuntimeError> {
    let parts = Parser::parse_within_dq(inner)?;
    let mut raw = String::new();
    let mut globbable = String::new();

    for part in &parts {
        let (ex, exg) = match part.kind {
            TokenKind::Escaped => expand_escaped(&part.text),
            TokenKind::UnquotedWord => {
                let expanded = ctx.with_state(|st| expand_vars(st, &part.text))?;
                let escaped = escape_wildcards(&expanded);
                (expanded, escaped)
            }
            TokenKind::BacktickWord => {
                let output = command_substitute(ctx, strip_quotes(&part.text))?;
                let escaped = escape_wildcards(&output);
                (output, escaped)
            }
            kind => {
                return Err(RuntimeError::Internal(format!(
                    "{kind}: unexpected double-quoted part"
                )));
            }
        };
        raw.push_str(&ex);
        globbable.push_str(&exg);
    }

    Ok((raw, globbable))
}

/// Backtick substitution: run the inner text on a nested worker against a
/// captured buffer, then join the output lines with single spaces.
fn command_substitute(ctx: &ExpandCtx<'_>, inner: &str) -> Result<String, RuntimeError> {
    tracing::debug!(command = inner, "command substitution");
    let outs = Stream::memory();
    let worker = ctx.rt.run(
        vec![inner.to_string()],
        RunOptions { final_outs: Some(outs.clone()), ..RunOptions::default() },
    );
    worker.join();

    let captured = outs.capture().unwrap_or_default();
    Ok(captured.lines().collect::<Vec<&str>>().join(" "))
}

/// Bracket-quote glob metacharacters so they match literally.
pub(crate) fn escape_wildcards(s: &str) -> String {
    s.chars()
        .map(|c| {
            if matches!(c, '[' | ']' | '?' | '*') {
                format!("[{c}]")
            } else {
                c.to_string()
            }
        })
        .collect()
}

/// Match a globbable field against the filesystem.
///
/// Patterns resolve against the process cwd, which tracks the worker's
/// frame. An invalid pattern simply matches nothing.
fn glob_matches(pattern: &str) -> Vec<String> {
    if pattern.is_empty() {
        return Vec::new();
    }
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };
    match glob::glob_with(pattern, options) {
        Ok(paths) => paths
            .filter_map(Result::ok)
            .map(|p| p.to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn strip_quotes(text: &str) -> &str {
    let len = text.len();
    if len >= 2 {
        &text[1..len - 1]
    } else {
        text
    }
}

#[cfg(test)]
#[path = "../expand_tests/words.rs"]
mod tests;
