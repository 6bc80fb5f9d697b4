//! `branch` and `rm-branch`: create and remove branch pointers.

use crate::error::{GitletError, Result};
use crate::repo::Repository;

/// Create a new branch pointing at the current head. Records the split point
/// (advisory — LCA remains authoritative, see `crate::lca`).
pub fn create(repo: &mut Repository, name: &str) -> Result<()> {
    if repo.state.heads.contains_key(name) {
        return Err(GitletError::BranchAlreadyExists);
    }
    repo.state.heads.insert(name.to_owned(), repo.state.head_pointer.clone());
    repo.state.split_points.insert(name.to_owned(), repo.state.head_pointer.clone());
    repo.save()?;
    Ok(())
}

/// Delete a branch pointer. Never touches the commits it pointed to.
pub fn remove(repo: &mut Repository, name: &str) -> Result<()> {
    if name == repo.state.on_branch {
        return Err(GitletError::CannotRemoveCurrentBranch);
    }
    if repo.state.heads.remove(name).is_none() {
        return Err(GitletError::NoBranchWithThatName);
    }
    repo.state.split_points.remove(name);
    repo.save()?;
    Ok(())
}
