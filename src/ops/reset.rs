//! `reset`: move the current branch to an arbitrary commit.

use crate::error::Result;
use crate::repo::Repository;
use crate::wtree;

/// Resolve `partial_id`, reconcile the working tree against it, and move the
/// current branch's head there.
pub fn reset(repo: &mut Repository, partial_id: &str) -> Result<()> {
    let id = repo.store.resolve_partial(partial_id)?;
    let target = repo.store.load_commit(&id)?;
    wtree::reconcile(repo, &id, &target)?;
    repo.state.heads.insert(repo.state.on_branch.clone(), id);
    repo.save()?;
    Ok(())
}
