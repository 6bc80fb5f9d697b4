//! End-to-end: remove a tracked file and commit the removal.

mod common;

use common::gitlet_ok;

#[test]
fn rm_deletes_the_working_file_and_stages_the_removal() {
    let dir = tempfile::tempdir().unwrap();
    gitlet_ok(dir.path(), &["init"]);

    std::fs::write(dir.path().join("h.txt"), "hi").unwrap();
    gitlet_ok(dir.path(), &["add", "h.txt"]);
    gitlet_ok(dir.path(), &["commit", "m1"]);

    gitlet_ok(dir.path(), &["rm", "h.txt"]);
    assert!(!dir.path().join("h.txt").exists());

    let status = gitlet_ok(dir.path(), &["status"]);
    assert!(status.contains("=== Removed Files ===\nh.txt"));
}

#[test]
fn committing_a_removal_drops_the_file_from_the_new_tree() {
    let dir = tempfile::tempdir().unwrap();
    gitlet_ok(dir.path(), &["init"]);

    std::fs::write(dir.path().join("h.txt"), "hi").unwrap();
    gitlet_ok(dir.path(), &["add", "h.txt"]);
    gitlet_ok(dir.path(), &["commit", "m1"]);

    gitlet_ok(dir.path(), &["rm", "h.txt"]);
    gitlet_ok(dir.path(), &["commit", "m2"]);

    let out = gitlet_ok(dir.path(), &["checkout", "--", "h.txt"]);
    assert_eq!(out, "File does not exist in that commit.");
}

#[test]
fn rm_on_an_untracked_file_reports_file_does_not_exist() {
    let dir = tempfile::tempdir().unwrap();
    gitlet_ok(dir.path(), &["init"]);
    let out = gitlet_ok(dir.path(), &["rm", "nope.txt"]);
    assert_eq!(out, "File does not exist.");
}

#[test]
fn status_shows_branches_with_the_current_one_starred() {
    let dir = tempfile::tempdir().unwrap();
    gitlet_ok(dir.path(), &["init"]);
    gitlet_ok(dir.path(), &["branch", "feat"]);

    let status = gitlet_ok(dir.path(), &["status"]);
    assert!(status.contains("*master"));
    assert!(status.contains("feat"));
}
