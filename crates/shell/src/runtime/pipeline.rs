// SPDX-License-Identifier: MIT

//! Pipe-sequence execution: stream plumbing between stages and command
//! dispatch.

use std::sync::Arc;

use parking_lot::Mutex;

use super::error::RuntimeError;
use super::registry::Invocation;
use super::script;
use super::state::WorkerState;
use super::Runtime;
use crate::ast::{PipeSequence, RedirectOp, SimpleCommand};
use crate::stream::Stream;

/// Caller-supplied endpoint overrides for the whole sequence.
#[derive(Default, Clone)]
pub(crate) struct Finals {
    pub ins: Option<Stream>,
    pub outs: Option<Stream>,
    pub errs: Option<Stream>,
}

/// Run one pipe sequence against a worker frame.
///
/// A stage's non-zero return breaks the sequence (later `;`-separated
/// sequences still run); errors other than an interrupt are reported here
/// and likewise just break the sequence.
pub(crate) fn run_pipe_sequence(
    rt: &Arc<Runtime>,
    frame: &Arc<Mutex<WorkerState>>,
    seq: &PipeSequence,
    finals: &Finals,
    poll_interrupt: bool,
) -> Result<(), RuntimeError> {
    let n = seq.commands.len();
    let mut prev_outs: Option<Stream> = None;

    for (idx, cmd) in seq.commands.iter().enumerate() {
        if poll_interrupt && rt.interrupt_requested() {
            return Err(RuntimeError::Interrupted);
        }

        {
            // Prefix assignments must not leak across stages:
            // `A=42 script1 | script2` does not set A for script2.
            let mut state = frame.lock();
            state.enclosing_environ.clear();
            for assignment in &cmd.assignments {
                state
                    .enclosing_environ
                    .insert(assignment.identifier.clone(), assignment.value.clone());
            }
            // A lone `A=42` merges into the frame permanently.
            if cmd.cmd_word.is_empty() && idx == 0 && n == 1 {
                let enclosing = std::mem::take(&mut state.enclosing_environ);
                state.environ.extend(enclosing);
            }
        }

        let ins = match prev_outs.take() {
            // When the previous stage sank to a file there is nothing to
            // pipe; give this stage an empty buffer.
            Some(prev) if prev.is_file() => Stream::memory(),
            Some(prev) => prev,
            None => match &finals.ins {
                Some(stream) => stream.clone(),
                None => frame.lock().sys_stdin.clone(),
            },
        };

        let (outs, errs) = match &cmd.io_redirect {
            Some(redirect) => {
                // `&3` bypasses the terminal.
                if redirect.filename == "&3" {
                    (Stream::Stdout, Stream::Stderr)
                } else {
                    let file = match open_redirect_target(redirect.operator, &redirect.filename) {
                        Ok(file) => file,
                        Err(e) => {
                            rt.report_error(&e);
                            break;
                        }
                    };
                    let stream = Stream::from_file(file);
                    // Stdout redirect covers stderr as well; deliberate
                    // deviation from POSIX.
                    (stream.clone(), stream)
                }
            }
            None if idx < n - 1 => {
                let buffer = Stream::memory();
                (buffer.clone(), buffer)
            }
            None => {
                let state = frame.lock();
                (
                    finals.outs.clone().unwrap_or_else(|| state.sys_stdout.clone()),
                    finals.errs.clone().unwrap_or_else(|| state.sys_stderr.clone()),
                )
            }
        };

        let code = if cmd.cmd_word.is_empty() {
            Ok(0)
        } else {
            dispatch(rt, frame, cmd, ins, outs.clone(), errs)
        };

        match code {
            Ok(code) => frame.lock().return_value = code,
            Err(RuntimeError::Interrupted) => return Err(RuntimeError::Interrupted),
            Err(e) => {
                rt.report_error(&e);
                break;
            }
        }

        if frame.lock().return_value != 0 {
            break;
        }

        // Rewind so the next stage reads from the start.
        outs.rewind();
        prev_outs = Some(outs);
    }

    Ok(())
}

fn open_redirect_target(op: RedirectOp, filename: &str) -> Result<std::fs::File, RuntimeError> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true);
    match op {
        RedirectOp::Truncate => options.truncate(true),
        RedirectOp::Append => options.append(true),
    };
    options.open(filename).map_err(|source| RuntimeError::Io {
        path: filename.to_string(),
        source,
    })
}

/// Resolve and run one command: registry first for bare names, then the
/// filesystem. Text files run as nested shell scripts; binary content is
/// refused.
fn dispatch(
    rt: &Arc<Runtime>,
    frame: &Arc<Mutex<WorkerState>>,
    cmd: &SimpleCommand,
    ins: Stream,
    outs: Stream,
    errs: Stream,
) -> Result<i32, RuntimeError> {
    let name = cmd.cmd_word.as_str();

    if !name.contains('/') {
        if let Some(command) = rt.registry().lookup(name) {
            tracing::debug!(command = name, "dispatching builtin");
            let mut state = frame.lock();
            let mut environ = state.environ.clone();
            environ.extend(state.enclosing_environ.clone());
            let mut argv = Vec::with_capacity(cmd.args.len() + 1);
            argv.push(name.to_string());
            argv.extend(cmd.args.iter().cloned());
            let mut ctx = Invocation {
                rt: rt.as_ref(),
                argv,
                environ,
                state: &mut *state,
                ins,
                outs,
                errs,
            };
            let code = command.run(&mut ctx);
            return Ok(code);
        }
    }

    let path = {
        let state = frame.lock();
        script::find_script_file(&state, name)?
    };

    if script::is_binary_file(&path)? {
        return Err(RuntimeError::NotExecutable(name.to_string()));
    }

    script::exec_sh_file(rt, frame, &path, &cmd.args, ins, outs, errs)
}
