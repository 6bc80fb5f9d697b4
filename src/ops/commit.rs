//! `commit`: fold the staging area into the head tree and persist a new commit.

use crate::clock::{format_timestamp, now};
use crate::error::{GitletError, Result};
use crate::model::commit::Commit;
use crate::model::types::ParentRef;
use crate::repo::Repository;

/// Create a new commit from the current staging area.
///
/// Errors with [`GitletError::NothingToCommit`] if nothing is staged, or
/// [`GitletError::EmptyCommitMessage`] if `message` is empty (the CLI
/// boundary is expected to catch this first, but the library enforces it too).
pub fn commit(repo: &mut Repository, message: &str) -> Result<()> {
    if message.is_empty() {
        return Err(GitletError::EmptyCommitMessage);
    }
    if repo.state.staging_add.is_empty() && repo.state.staging_rm.is_empty() {
        return Err(GitletError::NothingToCommit);
    }

    let head = repo.head_commit()?;
    let mut tree = head.tree.clone();
    for (name, blob_id) in &repo.state.staging_add {
        tree.insert(name.clone(), blob_id.clone());
    }
    for name in &repo.state.staging_rm {
        tree.remove(name);
    }

    let new_commit = Commit {
        parents: vec![ParentRef::Id(repo.state.head_pointer.clone())],
        author: repo.state.author.clone(),
        timestamp: format_timestamp(now()),
        message: message.to_owned(),
        tree,
    };
    let id = repo.store.put_commit(&new_commit)?;

    repo.state.heads.insert(repo.state.on_branch.clone(), id.clone());
    repo.state.head_pointer = id.clone();
    repo.state.staging_add.clear();
    repo.state.staging_rm.clear();
    repo.state.all_commits.insert(0, id);
    repo.save()?;
    tracing::debug!("created commit");
    Ok(())
}
