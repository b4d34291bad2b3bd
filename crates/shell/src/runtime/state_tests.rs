// SPDX-License-Identifier: MIT

//! Tests for worker frame derivation and propagation.

use std::collections::HashMap;
use std::path::PathBuf;

use super::*;
use crate::stream::Stream;

fn state_with(env: &[(&str, &str)]) -> WorkerState {
    let environ: HashMap<String, String> =
        env.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    WorkerState::new(environ, PathBuf::from("/tmp"), Stream::memory(), Stream::memory(), Stream::memory())
}

#[test]
fn child_inherits_environ_and_aliases() {
    let mut parent = state_with(&[("HOME", "/home/u")]);
    parent.aliases.insert("ll".into(), "ls -la".into());
    let child = WorkerState::child_of(&mut parent, 7);
    assert_eq!(child.env_get("HOME"), Some("/home/u"));
    assert_eq!(child.aliases.get("ll").map(|s| s.as_str()), Some("ls -la"));
    assert_eq!(child.worker_id, 7);
    assert_eq!(child.enclosed_cwd, PathBuf::from("/tmp"));
}

#[test]
fn child_absorbs_and_consumes_enclosing_environ() {
    let mut parent = state_with(&[]);
    parent.enclosing_environ.insert("0".into(), "script.sh".into());
    parent.enclosing_environ.insert("#".into(), "0".into());
    let child = WorkerState::child_of(&mut parent, 1);
    assert_eq!(child.env_get("0"), Some("script.sh"));
    assert!(parent.enclosing_environ.is_empty());
    assert!(child.enclosing_environ.is_empty());
}

#[test]
fn child_inherits_return_value() {
    let mut parent = state_with(&[]);
    parent.return_value = 3;
    let child = WorkerState::child_of(&mut parent, 1);
    assert_eq!(child.return_value, 3);
}

#[test]
fn absorb_copies_env_aliases_cwd_but_not_streams() {
    let mut parent = state_with(&[("A", "old")]);
    let mut child = WorkerState::child_of(&mut parent, 1);
    child.environ.insert("A".into(), "new".into());
    child.aliases.insert("x".into(), "y".into());
    child.cwd = PathBuf::from("/elsewhere");
    parent.absorb(&child);
    assert_eq!(parent.env_get("A"), Some("new"));
    assert!(parent.aliases.contains_key("x"));
    assert_eq!(parent.cwd, PathBuf::from("/elsewhere"));
}

#[test]
fn home_prefers_environ() {
    let st = state_with(&[("HOME", "/custom/home")]);
    assert_eq!(st.home(), PathBuf::from("/custom/home"));
}
