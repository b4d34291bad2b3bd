// SPDX-License-Identifier: MIT

//! Tests for runtime error messages.

use super::*;

#[test]
fn messages_match_shell_conventions() {
    assert_eq!(
        RuntimeError::EventNotFound { tok: "!xyz".into() }.to_string(),
        "!xyz: event not found"
    );
    assert_eq!(RuntimeError::FileNotFound("frob".into()).to_string(), "frob: command not found");
    assert_eq!(RuntimeError::IsDirectory("src".into()).to_string(), "src: is a directory");
    assert_eq!(RuntimeError::NotExecutable("a.bin".into()).to_string(), "a.bin: not executable");
    assert_eq!(
        RuntimeError::BadSubstitution("ambiguous redirect".into()).to_string(),
        "ambiguous redirect"
    );
}

#[test]
fn parse_errors_pass_through() {
    let parse = crate::error::ParseError::UnexpectedEof { expected: "a filename".into(), pos: 7 };
    let err: RuntimeError = parse.into();
    assert!(err.to_string().starts_with("syntax error: at char 7"));
}
