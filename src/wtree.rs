//! Working-tree reconciliation: the routine shared by checkout-branch,
//! reset, and fast-forward merge, plus the per-file primitives the merge
//! engine's eight-case table applies directly.

use std::path::Path;

use crate::error::{GitletError, Result};
use crate::model::commit::Commit;
use crate::model::types::ObjectId;
use crate::repo::Repository;

/// Replace the working tree with `target`'s contents and adopt it as HEAD.
///
/// 1. Untracked-safety gate against `target`.
/// 2. Delete files the current head tracks that `target` drops.
/// 3. Write every file `target` tracks.
/// 4. Point HEAD at `target_id` and clear staging.
pub fn reconcile(repo: &mut Repository, target_id: &ObjectId, target: &Commit) -> Result<()> {
    let head = repo.head_commit()?;
    check_untracked_safety(&repo.working_dir, &head, target)?;

    for name in head.tree.keys() {
        if !target.tree.contains_key(name) {
            delete_file(&repo.working_dir, name);
        }
    }
    for (name, blob_id) in &target.tree {
        let bytes = repo.store.load_blob(blob_id)?;
        write_file(&repo.working_dir, name, &bytes)?;
    }

    repo.state.head_pointer = target_id.clone();
    repo.state.staging_add.clear();
    repo.state.staging_rm.clear();
    Ok(())
}

/// A plain file sitting in `working_dir`, present in `target.tree`, and not
/// currently matching `head`'s recorded content for that name, would be
/// silently clobbered by reconciliation. Refuse instead.
///
/// Only scans the working directory root — never recurses into
/// subdirectories, mirroring the restricted delete in step 2.
pub fn check_untracked_safety(working_dir: &Path, head: &Commit, target: &Commit) -> Result<()> {
    let Ok(entries) = std::fs::read_dir(working_dir) else {
        return Ok(());
    };
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if target.tree.contains_key(&name) && !head.file_tracked_in_commit(working_dir, &name) {
            return Err(GitletError::UntrackedFileInTheWay);
        }
    }
    Ok(())
}

/// Restricted delete: a single named file directly under `working_dir`.
/// Missing files are not an error — the caller only calls this for names it
/// already knows were tracked.
pub fn delete_file(working_dir: &Path, name: &str) {
    let _ = std::fs::remove_file(working_dir.join(name));
}

/// Write `bytes` to `name` directly under `working_dir`, overwriting any
/// existing file.
pub fn write_file(working_dir: &Path, name: &str, bytes: &[u8]) -> Result<()> {
    std::fs::write(working_dir.join(name), bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::commit::Commit;
    use crate::model::types::ObjectId;
    use std::collections::BTreeMap;

    #[test]
    fn untracked_safety_blocks_clobbering_an_untracked_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), b"local edits").unwrap();

        let head = Commit::initial("me", "t");
        let mut target = Commit::initial("me", "t");
        target
            .tree
            .insert("f.txt".to_owned(), ObjectId::new("a".repeat(40)).unwrap());

        let err = check_untracked_safety(dir.path(), &head, &target).unwrap_err();
        assert!(matches!(err, GitletError::UntrackedFileInTheWay));
    }

    #[test]
    fn untracked_safety_allows_a_file_already_tracked_with_matching_content() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), b"same").unwrap();
        let id = ObjectId::new_unchecked(crate::digest::digest_bytes(b"same"));

        let mut head = Commit::initial("me", "t");
        head.tree.insert("f.txt".to_owned(), id.clone());
        let mut target = Commit::initial("me", "t");
        target.tree.insert("f.txt".to_owned(), id);

        assert!(check_untracked_safety(dir.path(), &head, &target).is_ok());
    }

    #[test]
    fn untracked_safety_ignores_files_absent_from_target() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scratch.txt"), b"whatever").unwrap();
        let head = Commit::initial("me", "t");
        let target = Commit::initial("me", "t");
        assert!(check_untracked_safety(dir.path(), &head, &target).is_ok());
    }

    #[test]
    fn delete_file_is_a_noop_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        delete_file(dir.path(), "nope.txt");
    }

    #[test]
    fn write_then_delete_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "x.txt", b"hi").unwrap();
        assert_eq!(std::fs::read(dir.path().join("x.txt")).unwrap(), b"hi");
        delete_file(dir.path(), "x.txt");
        assert!(!dir.path().join("x.txt").exists());
    }

    #[test]
    #[allow(clippy::unnecessary_wraps)]
    fn reconcile_touches_only_the_tree_diff() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = Repository::init(dir.path()).unwrap();
        let _ = BTreeMap::<String, ObjectId>::new();
        let blob_id = repo.store.put_blob_bytes(b"hello")?;
        let mut target = repo.head_commit()?;
        target.tree.insert("hello.txt".to_owned(), blob_id);
        target.message = "adds hello".to_owned();
        let target_id = repo.store.put_commit(&target)?;

        reconcile(&mut repo, &target_id, &target)?;
        assert_eq!(
            std::fs::read(repo.working_dir.join("hello.txt")).unwrap(),
            b"hello"
        );
        assert_eq!(repo.state.head_pointer, target_id);
        Ok(())
    }
}
