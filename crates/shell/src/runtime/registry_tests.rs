// SPDX-License-Identifier: MIT

//! Tests for the command registry.

use std::sync::Arc;

use super::*;

struct Probe;

impl Command for Probe {
    fn name(&self) -> &'static str {
        "probe"
    }

    fn run(&self, ctx: &mut Invocation<'_>) -> i32 {
        let _ = ctx.outs.write_str("probed\n");
        0
    }
}

#[test]
fn builtins_are_registered() {
    let registry = Registry::with_builtins();
    for name in ["echo", "cat", "printenv", "pwd", "cd", "alias", "unalias", "history", "true", "false"] {
        assert!(registry.lookup(name).is_some(), "missing builtin {name}");
    }
}

#[test]
fn lookup_miss_is_none() {
    let registry = Registry::with_builtins();
    assert!(registry.lookup("no-such-command").is_none());
}

#[test]
fn embedders_can_register_commands() {
    let mut registry = Registry::with_builtins();
    registry.register(Arc::new(Probe));
    assert!(registry.lookup("probe").is_some());
    assert!(registry.names().any(|n| n == "probe"));
}

#[test]
fn names_keep_insertion_order() {
    let mut registry = Registry::new();
    registry.register(Arc::new(Probe));
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec!["probe"]);
}
