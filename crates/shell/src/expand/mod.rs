// SPDX-License-Identifier: MIT

//! Expansion: history and alias rewriting, then lazy per-sequence word
//! expansion.
//!
//! An [`Expansion`] is built once per input line. Construction performs the
//! history and alias substitutions and exposes the rewritten header line;
//! each [`Expansion::next_pipe_sequence`] call then expands one pipe
//! sequence. The laziness matters: `A=42; echo $A` must expand `$A` only
//! after the assignment has run.

mod vars;
mod word;

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::ast::{
    Assignment, IoRedirect, PipeSequence, PipeSequenceAst, SimpleCommand, SimpleCommandAst,
};
use crate::parser::{ParsedLine, Parser};
use crate::runtime::{Runtime, RuntimeError, WorkerState};
use crate::token::TokenKind;
use word::{expand_word, ExpandCtx};

pub(crate) use vars::{expand_tilde, expand_vars};

pub struct Expansion {
    rt: Arc<Runtime>,
    frame: Arc<Mutex<WorkerState>>,
    /// The history-substituted form of the line, for the history store.
    line: String,
    pending: VecDeque<PipeSequenceAst>,
    total: usize,
}

impl Expansion {
    /// Parse and rewrite one line.
    ///
    /// History events are resolved first (and failing lookups abort the
    /// line with `EventNotFound`); aliases are then substituted repeatedly,
    /// each name at most once, re-parsing after every rewrite.
    pub(crate) fn new(
        rt: &Arc<Runtime>,
        frame: &Arc<Mutex<WorkerState>>,
        line: &str,
    ) -> Result<Expansion, RuntimeError> {
        let mut parsed = Parser::parse(line)?;

        if let Some(rewritten) = history_substitute(rt, &parsed)? {
            tracing::debug!(line = %rewritten, "history substitution");
            parsed = Parser::parse(&rewritten)?;
        }
        // The header records the history-substituted form, before aliases.
        let header_line = parsed.rejoin();

        let aliases = frame.lock().aliases.clone();
        let mut excluded: HashSet<String> = HashSet::new();
        while let Some(rewritten) = alias_substitute(&parsed, &aliases, &mut excluded) {
            tracing::debug!(line = %rewritten, "alias substitution");
            parsed = Parser::parse(&rewritten)?;
        }

        let total = parsed.sequences.len();
        Ok(Expansion {
            rt: rt.clone(),
            frame: frame.clone(),
            line: header_line,
            pending: parsed.sequences.into(),
            total,
        })
    }

    /// The rewritten line, recorded to history before any command runs.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Number of pipe sequences this line expands to.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Expand and yield the next pipe sequence.
    pub fn next_pipe_sequence(&mut self) -> Option<Result<PipeSequence, RuntimeError>> {
        let ast = self.pending.pop_front()?;
        Some(self.expand_sequence(&ast))
    }

    fn expand_sequence(&self, ast: &PipeSequenceAst) -> Result<PipeSequence, RuntimeError> {
        let ctx = ExpandCtx { rt: &self.rt, frame: &self.frame };
        let mut commands = Vec::with_capacity(ast.commands.len());
        for command in &ast.commands {
            commands.push(expand_command(&ctx, command)?);
        }
        Ok(PipeSequence { in_background: ast.in_background, commands })
    }
}

fn expand_command(
    ctx: &ExpandCtx<'_>,
    ast: &SimpleCommandAst,
) -> Result<SimpleCommand, RuntimeError> {
    let mut cmd = SimpleCommand::default();

    for assignment in &ast.assignments {
        // Multi-field values collapse to a single space-joined string.
        let value = expand_word(ctx, &assignment.value)?.join(" ");
        cmd.assignments.push(Assignment { identifier: assignment.identifier.clone(), value });
    }

    if let Some(word) = &ast.cmd_word {
        let mut fields = expand_word(ctx, word)?;
        if !fields.is_empty() {
            cmd.cmd_word = fields.remove(0);
            cmd.args.extend(fields);
        }
    }

    for word in &ast.args {
        cmd.args.extend(expand_word(ctx, word)?);
    }

    if let Some(redirect) = &ast.io_redirect {
        let fields = expand_word(ctx, &redirect.filename)?;
        if fields.len() > 1 {
            return Err(RuntimeError::SingleExpansionRequired { fields: fields.join(", ") });
        }
        let filename = fields.into_iter().next().unwrap_or_default();
        cmd.io_redirect = Some(IoRedirect { operator: redirect.operator, filename });
    }

    cmd.args.retain(|arg| !arg.is_empty());
    if cmd.cmd_word.is_empty() && !cmd.args.is_empty() {
        cmd.cmd_word = cmd.args.remove(0);
    }
    if let Some(redirect) = &cmd.io_redirect {
        if redirect.filename.is_empty() {
            return Err(RuntimeError::BadSubstitution("ambiguous redirect".to_string()));
        }
    }

    Ok(cmd)
}

/// Replace `!` event tokens with their history entries.
///
/// Returns the rewritten line if any replacement happened.
fn history_substitute(
    rt: &Arc<Runtime>,
    parsed: &ParsedLine,
) -> Result<Option<String>, RuntimeError> {
    let mut texts: Vec<String> = Vec::with_capacity(parsed.tokens.len());
    let mut found = false;

    for token in &parsed.tokens {
        if token.kind == TokenKind::Cmd && token.text.starts_with('!') {
            texts.push(rt.search_history(&token.text)?);
            found = true;
        } else {
            texts.push(token.text.clone());
        }
    }

    Ok(found.then(|| texts.join(" ")))
}

/// Replace aliased command words, excluding names already substituted in
/// this expansion so alias loops terminate.
fn alias_substitute(
    parsed: &ParsedLine,
    aliases: &indexmap::IndexMap<String, String>,
    excluded: &mut HashSet<String>,
) -> Option<String> {
    let mut texts: Vec<String> = Vec::with_capacity(parsed.tokens.len());
    let mut found = false;

    for token in &parsed.tokens {
        if token.kind == TokenKind::Cmd && !excluded.contains(&token.text) {
            if let Some(value) = aliases.get(&token.text) {
                excluded.insert(token.text.clone());
                texts.push(value.clone());
                found = true;
                continue;
            }
        }
        texts.push(token.text.clone());
    }

    found.then(|| texts.join(" "))
}

#[cfg(test)]
#[path = "../expand_tests/mod.rs"]
mod tests;
