// SPDX-License-Identifier: MIT

//! Tests for AST and expanded command types.

use super::*;

#[test]
fn redirect_op_display() {
    assert_eq!(RedirectOp::Truncate.to_string(), ">");
    assert_eq!(RedirectOp::Append.to_string(), ">>");
}

#[test]
fn default_simple_command_is_pure_assignment_shape() {
    let cmd = SimpleCommand::default();
    assert!(cmd.cmd_word.is_empty());
    assert!(cmd.assignments.is_empty());
    assert!(cmd.args.is_empty());
    assert!(cmd.io_redirect.is_none());
}

#[test]
fn expanded_types_compare_by_value() {
    let a = Assignment { identifier: "A".into(), value: "42".into() };
    let b = Assignment { identifier: "A".into(), value: "42".into() };
    assert_eq!(a, b);

    let r1 = IoRedirect { operator: RedirectOp::Append, filename: "log".into() };
    let r2 = IoRedirect { operator: RedirectOp::Truncate, filename: "log".into() };
    assert_ne!(r1, r2);
}
