//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn keyscribe_bin() -> Command {
    Command::cargo_bin("keyscribe").expect("binary should build")
}

#[test]
fn config_get_unknown_key() {
    keyscribe_bin()
        .args(["config", "get", "unknown_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown").and(predicate::str::contains("Valid keys")));
}

#[test]
fn config_set_unknown_key() {
    keyscribe_bin()
        .args(["config", "set", "unknown_key", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown").and(predicate::str::contains("Valid keys")));
}

#[test]
fn config_set_invalid_backend() {
    keyscribe_bin()
        .args(["config", "set", "backend", "cloud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api").and(predicate::str::contains("local")));
}

#[test]
fn config_set_invalid_temperature() {
    keyscribe_bin()
        .args(["config", "set", "temperature", "warm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("number").or(predicate::str::contains("0.0")));
}

#[test]
fn config_set_invalid_boolean() {
    keyscribe_bin()
        .args(["config", "set", "auto_paste", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("true").and(predicate::str::contains("false")));
}

#[test]
fn config_set_zero_history_limit() {
    keyscribe_bin()
        .args(["config", "set", "history_limit", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn config_list_with_no_file() {
    // Works even without a config file (loads as empty)
    let dir = tempfile::tempdir().expect("tempdir");

    keyscribe_bin()
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_key").and(predicate::str::contains("not set")));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().expect("tempdir");

    keyscribe_bin()
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success();

    keyscribe_bin()
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
