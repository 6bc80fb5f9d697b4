//! `add` and `remove`: the staging area's only two mutators.

use crate::digest::digest_bytes;
use crate::error::{GitletError, Result};
use crate::model::types::ObjectId;
use crate::repo::Repository;

/// Stage `filename` for the next commit.
///
/// Errors with [`GitletError::FileDoesNotExist`] if the file is absent from
/// the working directory. A file whose content already matches the head
/// commit's tree is not staged (and any stale staged entry for it is
/// discarded) — staging only ever records an actual change.
pub fn add(repo: &mut Repository, filename: &str) -> Result<()> {
    if !repo.working_dir.join(filename).is_file() {
        return Err(GitletError::FileDoesNotExist);
    }
    let blob_id = repo.store.put_blob_file(&repo.working_dir, filename)?;
    let head = repo.head_commit()?;

    if repo.state.staging_rm.remove(filename) {
        // Re-adding a file marked for removal cancels the removal; nothing else to do.
    } else if head.tree.get(filename) == Some(&blob_id) {
        repo.state.staging_add.remove(filename);
    } else {
        repo.state.staging_add.insert(filename.to_owned(), blob_id);
    }
    repo.save()?;
    Ok(())
}

/// Remove `filename` from tracking, per a four-way disk/staged/head comparison.
pub fn remove(repo: &mut Repository, filename: &str) -> Result<()> {
    let path = repo.working_dir.join(filename);
    let disk_id: Option<ObjectId> = std::fs::read(&path)
        .ok()
        .map(|bytes| ObjectId::new_unchecked(digest_bytes(&bytes)));
    let staged_id = repo.state.staging_add.get(filename).cloned();
    let head = repo.head_commit()?;
    let head_id = head.tree.get(filename).cloned();

    match disk_id {
        None => {
            if head_id.is_none() {
                return Err(GitletError::FileDoesNotExist);
            }
            repo.state.staging_add.remove(filename);
            repo.state.staging_rm.insert(filename.to_owned());
        }
        Some(disk) if Some(&disk) == staged_id.as_ref() => {
            repo.state.staging_add.remove(filename);
        }
        Some(disk) if Some(&disk) == head_id.as_ref() => {
            repo.state.staging_add.remove(filename);
            repo.state.staging_rm.insert(filename.to_owned());
            crate::wtree::delete_file(&repo.working_dir, filename);
        }
        Some(_) => return Err(GitletError::NoReasonToRemove),
    }
    repo.save()?;
    Ok(())
}
