//! Binary-level smoke tests exercising `assert_cmd`'s own assertion API
//! (as opposed to the `tests/common::gitlet_ok` helper used elsewhere),
//! to check the exact process-level contract: exit code and stdout/stderr
//! shape for a couple of boundary cases.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn no_command_given_prints_message_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("gitlet")
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a command."));
}

#[test]
fn unknown_command_prints_message_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("gitlet")
        .unwrap()
        .arg("frobnicate")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No command with that name exists."));
}

#[test]
fn commands_never_write_to_stderr_on_success() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("gitlet")
        .unwrap()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
