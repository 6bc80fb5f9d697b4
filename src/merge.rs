//! The three-way merge engine: preconditions, fast-forward, split point, the
//! eight-case per-file resolution table, and conflict marker synthesis.

use std::collections::BTreeSet;

use crate::error::{GitletError, Result};
use crate::lca::split_point;
use crate::model::commit::Commit;
use crate::model::types::{ObjectId, ParentRef};
use crate::repo::Repository;
use crate::wtree;

/// What `merge` actually did, once preconditions pass. The CLI layer turns
/// this into the two success-path messages printed to the user.
#[derive(Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// `heads[current]` was advanced to the other branch's head with no new commit.
    FastForwarded,
    /// A merge commit was created; `conflicted` tracks whether any file hit case 5/8c.
    Merged { conflicted: bool },
}

/// One file's resolution under the eight-case table.
enum Action {
    /// Drop the file (and its tree entry).
    Delete,
    /// Write `other`'s blob, replacing whatever is there.
    Write(ObjectId),
    /// Leave the tree entry (and working file) exactly as the current head has it.
    Keep,
    /// Synthesize conflict markers from `current` and `other` (either may be absent).
    Conflict,
}

/// Decide a single filename's action per the eight-case resolution table,
/// given the blob id recorded for it in the split, current, and other trees.
fn classify(split: Option<&ObjectId>, current: Option<&ObjectId>, other: Option<&ObjectId>) -> Action {
    if split.is_some() && split == current {
        return match other {
            None => Action::Delete,                                 // 1
            Some(o) if Some(o) != current => Action::Write(o.clone()), // 2
            Some(_) => Action::Keep,                                 // split = current = other
        };
    }
    if split.is_some() && split == other {
        return Action::Keep; // 3 (current present, differs from split) & 6 (current absent)
    }
    if current == other {
        return Action::Keep; // 4, subsumes 7 (both absent)
    }
    match (split, current, other) {
        (None, Some(_), None) => Action::Keep,                 // 8a
        (None, None, Some(o)) => Action::Write(o.clone()),      // 8b
        _ => Action::Conflict,                                   // 5, 8c
    }
}

fn conflict_bytes(store: &crate::store::ObjectStore, current: Option<&ObjectId>, other: Option<&ObjectId>) -> Result<Vec<u8>> {
    let current_bytes = match current {
        Some(id) => store.load_blob(id)?,
        None => Vec::new(),
    };
    let other_bytes = match other {
        Some(id) => store.load_blob(id)?,
        None => Vec::new(),
    };
    let mut out = Vec::with_capacity(current_bytes.len() + other_bytes.len() + 32);
    out.extend_from_slice(b"<<<<<<< HEAD\n");
    out.extend_from_slice(&current_bytes);
    out.extend_from_slice(b"=======\n");
    out.extend_from_slice(&other_bytes);
    out.extend_from_slice(b">>>>>>>\n");
    Ok(out)
}

/// Run `merge(other_branch)` against the currently checked-out branch.
///
/// Preconditions are checked in a fixed order, so the first failing one
/// determines the error message. No repository state changes unless every
/// precondition passes.
pub fn merge(repo: &mut Repository, other_branch: &str) -> Result<MergeOutcome> {
    if !repo.state.staging_add.is_empty() || !repo.state.staging_rm.is_empty() {
        return Err(GitletError::UncommittedChanges);
    }
    let other_head = repo
        .state
        .heads
        .get(other_branch)
        .cloned()
        .ok_or(GitletError::NoBranchWithThatName)?;
    if other_branch == repo.state.on_branch {
        return Err(GitletError::CannotMergeWithSelf);
    }

    let current_branch = repo.state.on_branch.clone();
    let current_head = repo.state.head_pointer.clone();

    let split = split_point(&repo.store, &current_head, &other_head)?.ok_or_else(|| GitletError::Corrupt {
        what: "merge".to_owned(),
        detail: format!("no common ancestor between {current_head} and {other_head}"),
    })?;

    if split == other_head {
        return Err(GitletError::GivenBranchIsAncestor);
    }

    if split == current_head {
        let other_commit = repo.store.load_commit(&other_head)?;
        wtree::reconcile(repo, &other_head, &other_commit)?;
        repo.state.heads.insert(current_branch, other_head);
        repo.save()?;
        tracing::info!("fast-forwarded merge");
        return Ok(MergeOutcome::FastForwarded);
    }

    let split_commit = repo.store.load_commit(&split)?;
    let current_commit = repo.store.load_commit(&current_head)?;
    let other_commit = repo.store.load_commit(&other_head)?;

    wtree::check_untracked_safety(&repo.working_dir, &current_commit, &other_commit)?;

    let mut names: BTreeSet<&String> = BTreeSet::new();
    names.extend(split_commit.tree.keys());
    names.extend(current_commit.tree.keys());
    names.extend(other_commit.tree.keys());

    let mut new_tree = current_commit.tree.clone();
    let mut conflicted = false;

    for name in names {
        let s = split_commit.tree.get(name);
        let c = current_commit.tree.get(name);
        let o = other_commit.tree.get(name);

        match classify(s, c, o) {
            Action::Delete => {
                wtree::delete_file(&repo.working_dir, name);
                new_tree.remove(name);
            }
            Action::Write(blob_id) => {
                let bytes = repo.store.load_blob(&blob_id)?;
                wtree::write_file(&repo.working_dir, name, &bytes)?;
                new_tree.insert(name.clone(), blob_id);
            }
            Action::Keep => {}
            Action::Conflict => {
                let bytes = conflict_bytes(&repo.store, c, o)?;
                let current_empty = c.map_or(true, |id| repo.store.load_blob(id).map(|b| b.is_empty()).unwrap_or(false));
                let other_empty = o.map_or(true, |id| repo.store.load_blob(id).map(|b| b.is_empty()).unwrap_or(false));
                if current_empty && other_empty {
                    continue;
                }
                conflicted = true;
                let blob_id = repo.store.put_blob_bytes(&bytes)?;
                wtree::write_file(&repo.working_dir, name, &bytes)?;
                new_tree.insert(name.clone(), blob_id);
            }
        }
    }

    let merge_commit = Commit {
        parents: vec![ParentRef::Id(current_head.clone()), ParentRef::Id(other_head.clone())],
        author: repo.state.author.clone(),
        timestamp: crate::clock::format_timestamp(crate::clock::now()),
        message: format!("Merged {other_branch} into {current_branch}."),
        tree: new_tree,
    };
    let merge_id = repo.store.put_commit(&merge_commit)?;

    repo.state.heads.insert(current_branch, merge_id.clone());
    repo.state.head_pointer = merge_id.clone();
    repo.state.staging_add.clear();
    repo.state.staging_rm.clear();
    repo.state.all_commits.insert(0, merge_id);
    repo.save()?;

    if conflicted {
        tracing::info!("merge produced conflicts");
    }
    Ok(MergeOutcome::Merged { conflicted })
}
