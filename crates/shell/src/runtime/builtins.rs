// SPDX-License-Identifier: MIT

//! Bootstrap command set for the registry.
//!
//! Just enough to start a usable shell and exercise the runtime: stream
//! plumbing (`echo`, `cat`), environment inspection (`printenv`, `pwd`),
//! frame mutation (`cd`, `alias`, `unalias`), history listing, and the two
//! exit-code primitives.

use std::path::Path;
use std::sync::Arc;

use super::registry::{Command, Invocation};

pub(super) fn all() -> Vec<Arc<dyn Command>> {
    vec![
        Arc::new(Echo),
        Arc::new(Cat),
        Arc::new(Printenv),
        Arc::new(Pwd),
        Arc::new(Cd),
        Arc::new(Alias),
        Arc::new(Unalias),
        Arc::new(HistoryCmd),
        Arc::new(TrueCmd),
        Arc::new(FalseCmd),
    ]
}

struct Echo;

impl Command for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn run(&self, ctx: &mut Invocation<'_>) -> i32 {
        let line = ctx.args().join(" ");
        let _ = ctx.outs.write_str(&format!("{line}\n"));
        0
    }
}

struct Cat;

impl Command for Cat {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn run(&self, ctx: &mut Invocation<'_>) -> i32 {
        if ctx.args().is_empty() {
            let text = ctx.ins.read_to_end();
            let _ = ctx.outs.write_str(&text);
            return 0;
        }

        let mut code = 0;
        for arg in ctx.args().to_vec() {
            match std::fs::read_to_string(Path::new(&arg)) {
                Ok(text) => {
                    let _ = ctx.outs.write_str(&text);
                }
                Err(e) => {
                    code = ctx.fail(&format!("{arg}: {e}"));
                }
            }
        }
        code
    }
}

struct Printenv;

impl Command for Printenv {
    fn name(&self) -> &'static str {
        "printenv"
    }

    fn run(&self, ctx: &mut Invocation<'_>) -> i32 {
        if ctx.args().is_empty() {
            let mut names: Vec<&String> = ctx.environ.keys().collect();
            names.sort();
            for name in names {
                let value = ctx.environ.get(name).map(|s| s.as_str()).unwrap_or("");
                let _ = ctx.outs.write_str(&format!("{name}={value}\n"));
            }
            return 0;
        }

        let mut code = 0;
        for name in ctx.args().to_vec() {
            match ctx.environ.get(&name) {
                Some(value) => {
                    let _ = ctx.outs.write_str(&format!("{value}\n"));
                }
                None => code = 1,
            }
        }
        code
    }
}

struct Pwd;

impl Command for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn run(&self, ctx: &mut Invocation<'_>) -> i32 {
        let cwd = ctx.state.cwd.display().to_string();
        let _ = ctx.outs.write_str(&format!("{cwd}\n"));
        0
    }
}

struct Cd;

impl Command for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn run(&self, ctx: &mut Invocation<'_>) -> i32 {
        let target = match ctx.args().first() {
            Some(arg) => Path::new(arg).to_path_buf(),
            None => ctx.state.home(),
        };
        match ctx.state.change_cwd(&target) {
            Ok(()) => 0,
            Err(e) => ctx.fail(&format!("{}: {e}", target.display())),
        }
    }
}

struct Alias;

impl Command for Alias {
    fn name(&self) -> &'static str {
        "alias"
    }

    fn run(&self, ctx: &mut Invocation<'_>) -> i32 {
        if ctx.args().is_empty() {
            for (name, value) in &ctx.state.aliases {
                let _ = ctx.outs.write_str(&format!("alias {name}='{value}'\n"));
            }
            return 0;
        }

        let mut code = 0;
        for arg in ctx.args().to_vec() {
            match arg.split_once('=') {
                Some((name, value)) if !name.is_empty() => {
                    ctx.state.aliases.insert(name.to_string(), value.to_string());
                }
                _ => match ctx.state.aliases.get(&arg) {
                    Some(value) => {
                        let _ = ctx.outs.write_str(&format!("alias {arg}='{value}'\n"));
                    }
                    None => {
                        code = ctx.fail(&format!("{arg}: not found"));
                    }
                },
            }
        }
        code
    }
}

struct Unalias;

impl Command for Unalias {
    fn name(&self) -> &'static str {
        "unalias"
    }

    fn run(&self, ctx: &mut Invocation<'_>) -> i32 {
        let mut code = 0;
        for name in ctx.args().to_vec() {
            if ctx.state.aliases.shift_remove(&name).is_none() {
                code = ctx.fail(&format!("{name}: not found"));
            }
        }
        code
    }
}

struct HistoryCmd;

impl Command for HistoryCmd {
    fn name(&self) -> &'static str {
        "history"
    }

    fn run(&self, ctx: &mut Invocation<'_>) -> i32 {
        let entries = ctx.rt.history_entries();
        for (i, entry) in entries.iter().rev().enumerate() {
            let _ = ctx.outs.write_str(&format!("{i:>3}  {entry}\n"));
        }
        0
    }
}

struct TrueCmd;

impl Command for TrueCmd {
    fn name(&self) -> &'static str {
        "true"
    }

    fn run(&self, _ctx: &mut Invocation<'_>) -> i32 {
        0
    }
}

struct FalseCmd;

impl Command for FalseCmd {
    fn name(&self) -> &'static str {
        "false"
    }

    fn run(&self, _ctx: &mut Invocation<'_>) -> i32 {
        1
    }
}

#[cfg(test)]
#[path = "builtins_tests.rs"]
mod tests;
