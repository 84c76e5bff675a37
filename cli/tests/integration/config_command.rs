//! `ktest config` against a temporary config file.

use predicates::prelude::*;

use crate::cli_tests::ktest;

fn config_file() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    (dir, path)
}

#[test]
fn test_config_path_honours_env_override() {
    let (_dir, path) = config_file();
    ktest()
        .env("KTEST_CONFIG", &path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path.display().to_string()));
}

#[test]
fn test_config_show_without_file_shows_defaults() {
    let (_dir, path) = config_file();
    ktest()
        .env("KTEST_CONFIG", &path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/data/local/tmp/kernel_net_tests"))
        .stdout(predicate::str::contains("vts_kernel_net_tests"));
}

#[test]
fn test_config_set_persists_value() {
    let (_dir, path) = config_file();
    ktest()
        .env("KTEST_CONFIG", &path)
        .args(["config", "set", "device.serial", "emulator-5554"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set device.serial = emulator-5554"));

    let output = ktest()
        .env("KTEST_CONFIG", &path)
        .args(["--json", "config", "show"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["device"]["serial"], "emulator-5554");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = config_file();
    ktest()
        .env("KTEST_CONFIG", &path)
        .args(["config", "set", "device.colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting: device.colour"));
    assert!(!path.exists());
}

#[test]
fn test_config_set_rejects_zero_timeout() {
    let (_dir, path) = config_file();
    ktest()
        .env("KTEST_CONFIG", &path)
        .args(["config", "set", "execution.timeout_secs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive number of seconds"));
}

#[test]
fn test_invalid_module_arch_is_reported_as_json_error() {
    let (_dir, path) = config_file();
    std::fs::write(&path, "modules:\n  - name: net\n    arch: mips\n").unwrap();

    let output = ktest()
        .env("KTEST_CONFIG", &path)
        .args(["--json", "run"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "CONFIG");
}
