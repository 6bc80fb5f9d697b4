//! Shared test helpers for gitlet's end-to-end tests.
//!
//! All tests run the compiled `gitlet` binary against a fresh temp
//! directory — no side effects outside the sandbox.

use std::path::Path;

use assert_cmd::Command;

/// Run `gitlet <args>` in `dir`, asserting it exits `0`, and return stdout.
pub fn gitlet_ok(dir: &Path, args: &[&str]) -> String {
    let output = Command::cargo_bin("gitlet")
        .unwrap()
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run gitlet");
    assert!(
        output.status.success(),
        "gitlet {args:?} exited non-zero: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim_end().to_owned()
}
