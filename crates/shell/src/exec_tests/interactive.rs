// SPDX-License-Identifier: MIT

//! Interactive plumbing: history recording, event substitution, the
//! prompt, and the rcfile.

use super::Sandbox;
use crate::terminal::Terminal;

#[test]
fn top_level_lines_are_recorded() {
    let sandbox = Sandbox::new();
    sandbox.run("echo one");
    sandbox.run("echo two");
    assert_eq!(sandbox.rt.history_entries(), vec!["echo two", "echo one"]);
}

#[test]
fn recorded_form_is_whitespace_normalized() {
    let sandbox = Sandbox::new();
    sandbox.run("echo    spaced");
    assert_eq!(sandbox.rt.history_entries(), vec!["echo spaced"]);
}

#[test]
fn bang_event_runs_and_records_resolved_form() {
    let sandbox = Sandbox::new();
    sandbox.run("echo hi");
    let output = sandbox.run("!ec");
    assert_eq!(output, "hi\n");
    // The resolved form became the newest entry; no duplicate piles up.
    assert_eq!(sandbox.rt.history_entries(), vec!["echo hi"]);
}

#[test]
fn scripts_do_not_see_or_grow_interactive_history() {
    let sandbox = Sandbox::new();
    sandbox.run("echo visible");
    sandbox.write_script("peek.sh", "history\necho script-ran\n");
    let output = sandbox.run("peek");
    // The script's `history` sees the swapped-in empty view.
    assert_eq!(output, "script-ran\n");
    assert_eq!(sandbox.rt.history_entries(), vec!["peek", "echo visible"]);
}

#[test]
fn history_builtin_lists_interactive_entries() {
    let sandbox = Sandbox::new();
    sandbox.run("echo first");
    let output = sandbox.run("history");
    assert_eq!(output, "  0  echo first\n  1  history\n");
}

#[test]
fn failed_event_still_leaves_history_intact() {
    let sandbox = Sandbox::new();
    sandbox.run("echo kept");
    sandbox.run("!zzz");
    assert_eq!(sandbox.rt.history_entries(), vec!["echo kept"]);
}

#[test]
fn history_navigation_drives_the_input_line() {
    let sandbox = Sandbox::new();
    sandbox.run("echo one");
    sandbox.run("echo two");

    sandbox.term.set_inp_line("draft", None);
    sandbox.rt.history_up();
    assert_eq!(sandbox.term.inp_line(), "echo two");
    sandbox.rt.history_up();
    assert_eq!(sandbox.term.inp_line(), "echo one");
    sandbox.rt.history_down();
    assert_eq!(sandbox.term.inp_line(), "echo two");
    sandbox.rt.history_down();
    assert_eq!(sandbox.term.inp_line(), "draft");
}

#[test]
fn prompt_uses_basename_for_capital_w() {
    let sandbox = Sandbox::new();
    // Point HOME away from the cwd so no `~` abbreviation interferes.
    sandbox.run("HOME=/nonexistent-prompt-home");
    sandbox.run("PROMPT='<\\W> '");
    let prompt = sandbox.rt.prompt();
    let cwd = sandbox.rt.cwd();
    let basename = cwd
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    assert_eq!(prompt, format!("<{basename}> "));
}

#[test]
fn prompt_keeps_first_level_under_home_unabbreviated() {
    // Directly under HOME, `\W` shows the whole `~/dir` form.
    let sandbox = Sandbox::new();
    let cwd = sandbox.rt.cwd();
    let parent = cwd.parent().map(|p| p.display().to_string()).unwrap_or_default();
    if parent.is_empty() {
        return;
    }
    sandbox.run(&format!("HOME={parent}"));
    sandbox.run("PROMPT='<\\W> '");
    let basename = cwd
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    assert_eq!(sandbox.rt.prompt(), format!("<~/{basename}> "));
}

#[test]
fn prompt_abbreviates_home_for_small_w() {
    let sandbox = Sandbox::new();
    sandbox.run("PROMPT='\\w$ '");
    let home = sandbox.rt.env_get("HOME").unwrap_or_default();
    let cwd = sandbox.rt.cwd().display().to_string();
    let prompt = sandbox.rt.prompt();
    if cwd.starts_with(&home) && !home.is_empty() {
        assert!(prompt.starts_with('~'), "got {prompt:?}");
    } else {
        assert!(prompt.starts_with(&cwd), "got {prompt:?}");
    }
}

#[test]
fn default_prompt_mentions_no_backslashes() {
    let sandbox = Sandbox::new();
    let prompt = sandbox.rt.prompt();
    assert!(!prompt.contains("\\W"));
    assert!(prompt.ends_with("$ "));
}

#[test]
fn rcfile_defines_default_aliases() {
    let sandbox = Sandbox::new();
    sandbox.rt.load_rcfile();
    let aliases = sandbox.rt.aliases();
    for name in ["env", "logout", "help", "la", "ll", "copy", "paste"] {
        assert!(aliases.contains_key(name), "missing default alias {name}");
    }
    // Rc lines never reach the history.
    assert!(sandbox.rt.history_entries().is_empty());
}

#[test]
fn rcfile_env_alias_works_end_to_end() {
    let sandbox = Sandbox::new();
    sandbox.rt.load_rcfile();
    sandbox.term.clear_output();
    let output = sandbox.run("MARKER=set; env");
    assert!(output.contains("MARKER=set"), "got {output:?}");
}

#[test]
fn user_rcfile_runs_after_the_default_one() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.root.path().join(".stashrc"), "alias mine='echo custom'\n")
        .expect("write rcfile");
    sandbox.rt.load_rcfile();
    sandbox.term.clear_output();
    assert_eq!(sandbox.run("mine"), "custom\n");
}

#[test]
fn history_file_round_trip() {
    let sandbox = Sandbox::new();
    sandbox.run("echo persisted");
    sandbox.rt.save_history();

    let text = std::fs::read_to_string(sandbox.root.path().join(".stash_history"))
        .expect("read history file");
    assert_eq!(text, "echo persisted");
}
