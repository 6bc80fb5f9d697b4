//! `Commit` — an immutable snapshot node in the history DAG.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::digest::digest_bytes;
use crate::model::types::{ObjectId, ParentRef};

/// One commit: author, timestamp, message, parent list, and a tree mapping
/// filename to blob id.
///
/// Field order here is the canonical serialization order: two commits with
/// identical `(parents, author, timestamp, message, tree)` serialize to
/// identical bytes and therefore share one id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Parent commit ids, in order. One element for a normal commit (the
    /// `"none"` sentinel only for the initial commit), two for a merge commit.
    pub parents: Vec<ParentRef>,
    /// Free-form author string.
    pub author: String,
    /// Formatted as `EEE MMM dd HH:mm:ss yyyy Z` (see `crate::clock`).
    pub timestamp: String,
    /// The commit message. Never empty for a non-initial commit.
    pub message: String,
    /// Filename to blob id, ordered by filename for deterministic serialization.
    pub tree: BTreeMap<String, ObjectId>,
}

impl Commit {
    /// Build the distinguished initial commit: parent `["none"]`, empty tree,
    /// message `"initial commit"`, epoch timestamp.
    #[must_use]
    pub fn initial(author: &str, epoch_timestamp: &str) -> Self {
        Self {
            parents: vec![ParentRef::None],
            author: author.to_owned(),
            timestamp: epoch_timestamp.to_owned(),
            message: "initial commit".to_owned(),
            tree: BTreeMap::new(),
        }
    }

    /// Serialize to the canonical byte form used to compute the commit id.
    ///
    /// # Panics
    /// Panics only if `serde_json` itself fails to serialize well-formed
    /// in-memory data, which does not happen for this type.
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("Commit serialization is infallible")
    }

    /// The commit's content-addressed id.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        ObjectId::new_unchecked(digest_bytes(&self.canonical_bytes()))
    }

    /// `true` if this is a merge commit (exactly two parents).
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() == 2
    }

    /// The first parent slot.
    #[must_use]
    pub fn first_parent(&self) -> &ParentRef {
        &self.parents[0]
    }

    /// The second parent slot, or the `"none"` sentinel for non-merge commits.
    #[must_use]
    pub fn second_parent(&self) -> ParentRef {
        self.parents.get(1).cloned().unwrap_or(ParentRef::None)
    }

    /// `true` iff recomputing `name`'s on-disk content under `working_dir`
    /// yields the blob id recorded for `name` in this commit's tree.
    ///
    /// This is the semantics working-tree reconciliation and
    /// `checkout`/`merge` use to decide whether a file is "tracked": it is
    /// about *current content matching*, not mere presence in the tree.
    #[must_use]
    pub fn file_tracked_in_commit(&self, working_dir: &Path, name: &str) -> bool {
        let Some(expected) = self.tree.get(name) else {
            return false;
        };
        let Ok(bytes) = std::fs::read(working_dir.join(name)) else {
            return false;
        };
        digest_bytes(&bytes) == expected.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_commit_shape() {
        let c = Commit::initial("Default author", "Thu Jan 01 00:00:00 1970 +0000");
        assert_eq!(c.parents, vec![ParentRef::None]);
        assert_eq!(c.message, "initial commit");
        assert!(c.tree.is_empty());
        assert!(!c.is_merge());
    }

    #[test]
    fn identical_commits_share_an_id() {
        let a = Commit::initial("Default author", "Thu Jan 01 00:00:00 1970 +0000");
        let b = Commit::initial("Default author", "Thu Jan 01 00:00:00 1970 +0000");
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn different_messages_different_id() {
        let mut a = Commit::initial("x", "t");
        let mut b = a.clone();
        a.message = "one".to_owned();
        b.message = "two".to_owned();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn is_merge_requires_two_parents() {
        let id = ObjectId::new("a".repeat(40)).unwrap();
        let mut c = Commit::initial("x", "t");
        c.parents = vec![ParentRef::Id(id.clone())];
        assert!(!c.is_merge());
        c.parents.push(ParentRef::Id(id));
        assert!(c.is_merge());
    }

    #[test]
    fn second_parent_is_none_sentinel_for_normal_commit() {
        let id = ObjectId::new("a".repeat(40)).unwrap();
        let mut c = Commit::initial("x", "t");
        c.parents = vec![ParentRef::Id(id)];
        assert_eq!(c.second_parent(), ParentRef::None);
    }

    #[test]
    fn tree_is_sorted_by_filename_in_canonical_bytes() {
        let mut c = Commit::initial("x", "t");
        let id = ObjectId::new("a".repeat(40)).unwrap();
        c.tree.insert("zeta.txt".to_owned(), id.clone());
        c.tree.insert("alpha.txt".to_owned(), id);
        let bytes = c.canonical_bytes();
        let text = String::from_utf8(bytes).unwrap();
        let alpha_pos = text.find("alpha.txt").unwrap();
        let zeta_pos = text.find("zeta.txt").unwrap();
        assert!(alpha_pos < zeta_pos);
    }

    #[test]
    fn file_tracked_in_commit_matches_on_disk_content() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), b"hi").unwrap();
        let mut c = Commit::initial("x", "t");
        let id = ObjectId::new_unchecked(digest_bytes(b"hi"));
        c.tree.insert("f.txt".to_owned(), id);
        assert!(c.file_tracked_in_commit(dir.path(), "f.txt"));
    }

    #[test]
    fn file_tracked_in_commit_false_when_content_differs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), b"changed").unwrap();
        let mut c = Commit::initial("x", "t");
        let id = ObjectId::new_unchecked(digest_bytes(b"hi"));
        c.tree.insert("f.txt".to_owned(), id);
        assert!(!c.file_tracked_in_commit(dir.path(), "f.txt"));
    }

    #[test]
    fn file_tracked_in_commit_false_when_missing_from_tree() {
        let dir = tempfile::tempdir().unwrap();
        let c = Commit::initial("x", "t");
        assert!(!c.file_tracked_in_commit(dir.path(), "f.txt"));
    }
}
