//! `log`, `global-log`, `find`, and `status`: read-only history reports.
//!
//! Each function returns the exact text the CLI prints; none of them touch
//! repository state.

use crate::dag::first_parent_chain;
use crate::error::{GitletError, Result};
use crate::model::commit::Commit;
use crate::model::types::ObjectId;
use crate::repo::Repository;

fn format_entries(entries: impl Iterator<Item = (ObjectId, Commit)>) -> String {
    let mut out = String::new();
    for (id, commit) in entries {
        out.push_str("===\n");
        out.push_str(&format!("commit {id}\n"));
        if commit.is_merge() {
            let p1 = commit.first_parent().id().map_or_else(String::new, |i| i.short().to_owned());
            let p2 = commit.second_parent().id().map_or_else(String::new, |i| i.short().to_owned());
            out.push_str(&format!("Merge: {p1} {p2}\n"));
        }
        out.push_str(&format!("Date: {}\n", commit.timestamp));
        out.push_str(&commit.message);
        out.push_str("\n\n");
    }
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Walk the current head by first-parent only, most recent first.
pub fn log(repo: &Repository) -> Result<String> {
    let chain = first_parent_chain(&repo.store, &repo.state.head_pointer)?;
    Ok(format_entries(chain.into_iter()))
}

/// Every commit this repository has ever created, in `all_commits` order.
pub fn global_log(repo: &Repository) -> Result<String> {
    let mut entries = Vec::with_capacity(repo.state.all_commits.len());
    for id in &repo.state.all_commits {
        entries.push((id.clone(), repo.store.load_commit(id)?));
    }
    Ok(format_entries(entries.into_iter()))
}

/// Ids of every commit whose message contains `keyword`, one per line.
///
/// Errors with [`GitletError::NoCommitMatchesMessage`] if nothing matches.
pub fn find(repo: &Repository, keyword: &str) -> Result<String> {
    let mut out = String::new();
    for id in &repo.state.all_commits {
        let commit = repo.store.load_commit(id)?;
        if commit.message.contains(keyword) {
            out.push_str(&id.to_string());
            out.push('\n');
        }
    }
    if out.is_empty() {
        return Err(GitletError::NoCommitMatchesMessage);
    }
    out.pop();
    Ok(out)
}

/// The four-section status report. The last two sections are always empty
/// (no working-tree diffing is implemented — see DESIGN.md) but still print
/// their headers, matching the source byte-for-byte.
pub fn status(repo: &Repository) -> String {
    let mut out = String::new();
    out.push_str("=== Branches ===\n");
    for name in repo.state.heads.keys() {
        if *name == repo.state.on_branch {
            out.push('*');
        }
        out.push_str(name);
        out.push('\n');
    }
    out.push('\n');

    out.push_str("=== Staged Files ===\n");
    for name in repo.state.staging_add.keys() {
        out.push_str(name);
        out.push('\n');
    }
    out.push('\n');

    out.push_str("=== Removed Files ===\n");
    for name in &repo.state.staging_rm {
        out.push_str(name);
        out.push('\n');
    }
    out.push('\n');

    out.push_str("=== Modifications Not Staged For Commit ===\n");
    out.push('\n');
    out.push_str("=== Untracked Files ===\n");
    out
}
