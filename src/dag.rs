//! Traversal helpers over the commit DAG: first-parent walks used by `log`.

use crate::error::Result;
use crate::model::commit::Commit;
use crate::model::types::ObjectId;
use crate::store::ObjectStore;

/// Walk from `head` by first-parent only, until the sentinel parent is reached.
///
/// Returns `(id, commit)` pairs in traversal order (most recent first).
pub fn first_parent_chain(store: &ObjectStore, head: &ObjectId) -> Result<Vec<(ObjectId, Commit)>> {
    let mut chain = Vec::new();
    let mut current = Some(head.clone());
    while let Some(id) = current {
        let commit = store.load_commit(&id)?;
        let next = commit.first_parent().id().cloned();
        chain.push((id, commit));
        current = next;
    }
    Ok(chain)
}
