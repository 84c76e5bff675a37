//! Help, version and offline commands.

use assert_cmd::Command;
use predicates::prelude::*;

pub fn ktest() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ktest"));
    cmd.env("NO_COLOR", "1")
        .env_remove("ANDROID_SERIAL")
        .env_remove("KTEST_LOG");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    ktest().assert().code(2).stderr(predicate::str::contains(
        "kernel test binaries on an Android device",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    let output = ktest().arg("--help").output().unwrap();
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for command in ["run", "locate", "find", "exec", "gate", "config", "version"] {
        assert!(help.contains(command), "help is missing `{command}`:\n{help}");
    }
}

#[test]
fn test_version_command_shows_version() {
    ktest()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ktest 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    ktest()
        .args(["version", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version": "0.1.0""#));
}

// --- Architecture gate ---

#[test]
fn test_gate_matching_arch_runs() {
    ktest()
        .args(["gate", "--abi", "arm64-v8a", "--arch", "arm64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RUN"));
}

#[test]
fn test_gate_mismatched_arch_bypasses() {
    ktest()
        .args(["gate", "--abi", "arm64-v8a", "--arch", "arm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FULL_MODULE_BYPASS"));
}

#[test]
fn test_gate_without_arch_runs() {
    ktest()
        .args(["-q", "gate", "--abi", "arm64-v8a"])
        .assert()
        .success()
        .stdout(predicate::str::diff("RUN\n"));
}

#[test]
fn test_gate_json() {
    let output = ktest()
        .args(["--json", "gate", "--abi", "x86", "--arch", "x86_64"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["decision"], "FULL_MODULE_BYPASS");
    assert_eq!(value["abi"], "x86");
}

// --- Argument validation ---

#[test]
fn test_exec_requires_a_command() {
    ktest().arg("exec").assert().code(2);
}

#[test]
fn test_run_rejects_zero_timeout() {
    ktest().args(["run", "--timeout", "0"]).assert().code(2);
}
