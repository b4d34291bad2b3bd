// SPDX-License-Identifier: MIT

//! Tests for variable and tilde expansion.

use std::collections::HashMap;
use std::path::PathBuf;

use super::*;
use crate::runtime::{RuntimeError, WorkerState};
use crate::stream::Stream;

fn state_with(env: &[(&str, &str)]) -> WorkerState {
    let environ: HashMap<String, String> =
        env.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    let mut state = WorkerState::new(
        environ,
        PathBuf::from("/tmp"),
        Stream::memory(),
        Stream::memory(),
        Stream::memory(),
    );
    state.worker_id = 12;
    state.return_value = 3;
    state
}

fn expand(env: &[(&str, &str)], s: &str) -> String {
    match expand_vars(&state_with(env), s) {
        Ok(out) => out,
        Err(e) => panic!("expansion of {s:?} failed: {e}"),
    }
}

#[yare::parameterized(
    plain_text = { "no vars here", "no vars here" },
    simple = { "$A", "42" },
    embedded = { "x${A}y", "x42y" },
    braced = { "${A}", "42" },
    maximal_name_run = { "$AB", "" },
    name_ends_at_punct = { "$A/file", "42/file" },
    adjacent_vars = { "$A$A", "4242" },
    unknown_is_empty = { "$UNSET_VAR_XYZ", "" },
    lone_trailing_dollar = { "price: $", "price: $" },
    dollar_before_punct = { "$-", "$-" },
    trailing_name = { "val=$A", "val=42" },
)]
fn expands(input: &str, expected: &str) {
    assert_eq!(expand(&[("A", "42")], input), expected);
}

#[test]
fn special_variables() {
    let env = [("1", "one"), ("2", "two"), ("#", "2"), ("@", "one\ttwo")];
    assert_eq!(expand(&env, "$1"), "one");
    assert_eq!(expand(&env, "$2-$1"), "two-one");
    assert_eq!(expand(&env, "$#"), "2");
    assert_eq!(expand(&env, "$@"), "one\ttwo");
}

#[test]
fn question_mark_is_the_return_value() {
    assert_eq!(expand(&[], "$?"), "3");
    assert_eq!(expand(&[], "${?}"), "3");
}

#[test]
fn double_dollar_is_the_worker_id() {
    assert_eq!(expand(&[], "$$"), "12");
}

#[test]
fn braced_positional() {
    assert_eq!(expand(&[("1", "one")], "${1}"), "one");
}

#[yare::parameterized(
    empty_braces = { "${}" },
    unterminated = { "${A" },
    bad_char_in_braces = { "${A-B}" },
)]
fn bad_substitution(input: &str) {
    let state = state_with(&[("A", "42")]);
    assert!(matches!(expand_vars(&state, input), Err(RuntimeError::BadSubstitution(_))));
}

#[test]
fn tilde_expands_to_home() {
    let state = state_with(&[("HOME", "/home/user")]);
    assert_eq!(expand_tilde(&state, "~"), "/home/user");
    assert_eq!(expand_tilde(&state, "~/bin"), "/home/user/bin");
}

#[test]
fn tilde_with_current_user() {
    let state = state_with(&[("HOME", "/home/user"), ("USER", "user")]);
    assert_eq!(expand_tilde(&state, "~user/bin"), "/home/user/bin");
}

#[test]
fn tilde_with_other_user_is_literal() {
    let state = state_with(&[("HOME", "/home/user"), ("USER", "user")]);
    assert_eq!(expand_tilde(&state, "~other/bin"), "~other/bin");
}

#[test]
fn tilde_not_at_start_is_untouched() {
    let state = state_with(&[("HOME", "/home/user")]);
    assert_eq!(expand_tilde(&state, "a~b"), "a~b");
}
