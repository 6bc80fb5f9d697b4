//! `checkout`, in its three forms.

use crate::error::{GitletError, Result};
use crate::repo::Repository;
use crate::wtree;

/// `checkout -- <file>`: restore `filename` from the head commit's tree.
/// Touches neither staging nor HEAD.
pub fn file_at_head(repo: &Repository, filename: &str) -> Result<()> {
    let head = repo.head_commit()?;
    let blob_id = head.tree.get(filename).ok_or(GitletError::FileNotInCommit)?;
    let bytes = repo.store.load_blob(blob_id)?;
    wtree::write_file(&repo.working_dir, filename, &bytes)
}

/// `checkout <commit> -- <file>`: restore `filename` from an arbitrary
/// (possibly abbreviated) commit's tree. Touches neither staging nor HEAD.
pub fn file_at_commit(repo: &Repository, commit_id: &str, filename: &str) -> Result<()> {
    let id = repo.store.resolve_partial(commit_id)?;
    let commit = repo.store.load_commit(&id)?;
    let blob_id = commit.tree.get(filename).ok_or(GitletError::FileNotInCommit)?;
    let bytes = repo.store.load_blob(blob_id)?;
    wtree::write_file(&repo.working_dir, filename, &bytes)
}

/// `checkout <branch>`: reconcile the working tree against the branch's
/// head and switch `on_branch`.
pub fn branch(repo: &mut Repository, branch_name: &str) -> Result<()> {
    if !repo.state.heads.contains_key(branch_name) {
        return Err(GitletError::NoSuchBranch);
    }
    if branch_name == repo.state.on_branch {
        return Err(GitletError::AlreadyOnThatBranch);
    }
    let target_id = repo.state.heads[branch_name].clone();
    let target = repo.store.load_commit(&target_id)?;
    wtree::reconcile(repo, &target_id, &target)?;
    repo.state.on_branch = branch_name.to_owned();
    repo.save()?;
    Ok(())
}
