// SPDX-License-Identifier: MIT

//! Workspace-level behavior specs for the shell core.

mod specs {
    mod prelude;

    mod boundaries;
    mod invariants;
    mod scenarios;
}
