// SPDX-License-Identifier: MIT

//! Shell-script dispatch: resolution, positionals, state isolation.

use serial_test::serial;

use super::Sandbox;

#[test]
fn script_resolves_from_bin_path_by_bare_name() {
    let sandbox = Sandbox::new();
    sandbox.write_script("greet.sh", "echo hello from script\n");
    assert_eq!(sandbox.run("greet"), "hello from script\n");
    assert_eq!(sandbox.rt.last_return_value(), 0);
}

#[test]
fn script_resolves_with_explicit_suffix() {
    let sandbox = Sandbox::new();
    sandbox.write_script("greet.sh", "echo suffixed\n");
    assert_eq!(sandbox.run("greet.sh"), "suffixed\n");
}

#[test]
fn script_receives_positional_variables() {
    let sandbox = Sandbox::new();
    sandbox.write_script("args.sh", "echo $1:$2\necho count=$#\n");
    assert_eq!(sandbox.run("args one two"), "one:two\ncount=2\n");
}

#[test]
fn script_at_dollar_is_tab_joined() {
    let sandbox = Sandbox::new();
    sandbox.write_script("all.sh", "echo [$@]\n");
    assert_eq!(sandbox.run("all a b"), "[a\tb]\n");
}

#[test]
fn script_dollar_zero_is_the_script_path() {
    let sandbox = Sandbox::new();
    sandbox.write_script("self.sh", "echo $0\n");
    let output = sandbox.run("self");
    assert!(output.trim_end().ends_with("self.sh"), "got {output:?}");
}

#[test]
fn script_variables_do_not_leak_to_the_caller() {
    let sandbox = Sandbox::new();
    sandbox.write_script("setter.sh", "SCRIPT_LOCAL=1\necho inner=$SCRIPT_LOCAL\n");
    assert_eq!(sandbox.run("setter"), "inner=1\n");
    assert!(sandbox.rt.env_get("SCRIPT_LOCAL").is_none());
}

#[test]
fn script_sees_but_does_not_keep_caller_environment() {
    let sandbox = Sandbox::new();
    sandbox.run("SHARED=yes");
    sandbox.write_script("reader.sh", "echo saw=$SHARED\n");
    assert_eq!(sandbox.run("reader"), "saw=yes\n");
}

#[test]
fn script_return_value_propagates() {
    let sandbox = Sandbox::new();
    sandbox.write_script("fail.sh", "false\n");
    sandbox.run("fail");
    assert_eq!(sandbox.rt.last_return_value(), 1);
}

#[test]
fn failed_resolution_reports_and_the_script_continues() {
    let sandbox = Sandbox::new();
    sandbox.write_script("brittle.sh", "definitely-not-a-command-xyz\necho after\n");
    let output = sandbox.run("brittle");
    assert_eq!(output, "stash: definitely-not-a-command-xyz: command not found\nafter\n");
}

#[test]
fn scripts_nest() {
    let sandbox = Sandbox::new();
    sandbox.write_script("outer.sh", "echo outer-start\ninner\necho outer-end\n");
    sandbox.write_script("inner.sh", "echo nested\n");
    assert_eq!(sandbox.run("outer"), "outer-start\nnested\nouter-end\n");
}

#[test]
#[serial]
fn script_cd_is_restored_on_exit() {
    let sandbox = Sandbox::new();
    let target = sandbox.path("bin");
    sandbox.write_script("mover.sh", &format!("cd {target}\npwd\n"));
    let before = std::env::current_dir().expect("cwd");
    let output = sandbox.run("mover");
    assert!(output.trim_end().ends_with("/bin"), "got {output:?}");
    assert_eq!(std::env::current_dir().expect("cwd"), before);
    assert_eq!(sandbox.rt.cwd(), before);
}

#[test]
#[serial]
fn top_level_cd_persists() {
    let sandbox = Sandbox::new();
    let before = std::env::current_dir().expect("cwd");
    let target = sandbox.path("bin");
    sandbox.run(&format!("cd {target}"));
    assert!(sandbox.rt.cwd().ends_with("bin"));
    assert!(std::env::current_dir().expect("cwd").ends_with("bin"));

    std::env::set_current_dir(&before).expect("restore cwd");
    // Keep the runtime's view consistent for any later assertions.
    sandbox.run(&format!("cd {}", before.display()));
}

#[test]
fn binary_file_is_not_executable() {
    let sandbox = Sandbox::new();
    let blob = sandbox.root.path().join("bin").join("blob.sh");
    std::fs::write(&blob, [0x7F, 0x45, 0x4C, 0x46, 0x00, 0x01]).expect("write blob");
    let output = sandbox.run("blob");
    assert_eq!(output, "stash: blob: not executable\n");
}

#[test]
fn directory_match_is_reported() {
    let sandbox = Sandbox::new();
    std::fs::create_dir(sandbox.root.path().join("bin").join("tool.sh")).expect("mkdir");
    let output = sandbox.run("tool");
    assert_eq!(output, "stash: tool: is a directory\n");
}

#[test]
fn missing_command_is_reported() {
    let sandbox = Sandbox::new();
    let output = sandbox.run("definitely-not-a-command-xyz");
    assert_eq!(output, "stash: definitely-not-a-command-xyz: command not found\n");
    assert_eq!(sandbox.rt.last_return_value(), 0);
}
