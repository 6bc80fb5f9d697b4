//! Repository state: HEAD, branches, staging area, and the all-commits index.
//!
//! The single mutable aggregate is persisted as one JSON blob, `<root>/repo`,
//! rewritten as a whole on every mutation via rename-over-temp.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clock::epoch_timestamp;
use crate::error::{GitletError, Result};
use crate::model::commit::Commit;
use crate::model::types::ObjectId;
use crate::store::ObjectStore;

/// Name of the implicit first branch created by `init`.
pub const MASTER: &str = "master";

/// Default author name until an explicit `author` command changes it.
pub const DEFAULT_AUTHOR: &str = "Default author";

/// The persisted repository aggregate (everything except the object store itself).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepoState {
    /// Branch name to its current tip commit id.
    pub heads: BTreeMap<String, ObjectId>,
    /// Branch name to the commit id it was created from (advisory; used by
    /// the merge engine to pick a split point when the branch has no other
    /// recorded ancestry).
    pub split_points: BTreeMap<String, ObjectId>,
    /// The current commit, redundant with `heads[on_branch]`.
    pub head_pointer: ObjectId,
    /// The currently checked-out branch.
    pub on_branch: String,
    /// Staged additions: filename to blob id.
    pub staging_add: BTreeMap<String, ObjectId>,
    /// Staged removals.
    pub staging_rm: BTreeSet<String>,
    /// Every commit id ever created in this repository, newest first.
    pub all_commits: Vec<ObjectId>,
    /// Default author attached to new commits.
    pub author: String,
}

impl RepoState {
    /// `head_pointer == heads[on_branch]` — checked after every mutation in
    /// debug builds; see [`RepoState::check_invariants`].
    fn check_invariants(&self) {
        debug_assert_eq!(
            self.heads.get(&self.on_branch),
            Some(&self.head_pointer),
            "head_pointer must equal heads[on_branch]"
        );
        debug_assert!(
            self.staging_add
                .keys()
                .all(|f| !self.staging_rm.contains(f)),
            "staging_add and staging_rm must be disjoint"
        );
    }
}

/// An open repository: persisted state plus the object store and working directory.
pub struct Repository {
    /// The `.gitlet` directory.
    pub gitlet_dir: PathBuf,
    /// The directory whose files are tracked (the parent of `.gitlet`).
    pub working_dir: PathBuf,
    /// The content-addressed object store.
    pub store: ObjectStore,
    /// The in-memory repository state, kept in sync with the `repo` blob.
    pub state: RepoState,
}

fn gitlet_dir_for(working_dir: &Path) -> PathBuf {
    working_dir.join(".gitlet")
}

impl Repository {
    /// Initialize a brand-new repository rooted at `working_dir`.
    ///
    /// # Errors
    /// Returns [`GitletError::AlreadyInitialized`] if a repository already exists.
    pub fn init(working_dir: &Path) -> Result<Self> {
        Self::init_with_author(working_dir, DEFAULT_AUTHOR)
    }

    /// Initialize a brand-new repository, using `author` as the initial
    /// default author instead of [`DEFAULT_AUTHOR`].
    ///
    /// This is how `.gitlet/config.toml`'s `[author] name` override reaches
    /// the repository: the CLI reads the config before calling `init`, and
    /// passes its resolved author name through here. The `author` command
    /// can still change it afterward.
    ///
    /// "Already exists" is judged by the `repo` marker blob, not by the mere
    /// presence of `.gitlet/` — this is what lets a `config.toml` be staged
    /// in `.gitlet/` ahead of the very first `init`.
    ///
    /// # Errors
    /// Returns [`GitletError::AlreadyInitialized`] if a repository already exists.
    pub fn init_with_author(working_dir: &Path, author: &str) -> Result<Self> {
        let gitlet_dir = gitlet_dir_for(working_dir);
        if gitlet_dir.join("repo").is_file() {
            return Err(GitletError::AlreadyInitialized);
        }
        std::fs::create_dir_all(&gitlet_dir)?;
        let store = ObjectStore::new(gitlet_dir.clone());
        store.init()?;

        let initial = Commit::initial(author, &epoch_timestamp());
        let initial_id = store.put_commit(&initial)?;

        let mut heads = BTreeMap::new();
        heads.insert(MASTER.to_owned(), initial_id.clone());

        let state = RepoState {
            heads,
            split_points: BTreeMap::new(),
            head_pointer: initial_id.clone(),
            on_branch: MASTER.to_owned(),
            staging_add: BTreeMap::new(),
            staging_rm: BTreeSet::new(),
            all_commits: vec![initial_id],
            author: author.to_owned(),
        };

        let repo = Self {
            gitlet_dir,
            working_dir: working_dir.to_path_buf(),
            store,
            state,
        };
        repo.save()?;
        tracing::info!("initialized gitlet repository");
        Ok(repo)
    }

    /// Load an existing repository rooted at `working_dir`.
    ///
    /// # Errors
    /// Returns [`GitletError::NotInitialized`] if `.gitlet` or `.gitlet/repo` is missing.
    pub fn load(working_dir: &Path) -> Result<Self> {
        let gitlet_dir = gitlet_dir_for(working_dir);
        let repo_path = gitlet_dir.join("repo");
        if !gitlet_dir.is_dir() || !repo_path.is_file() {
            return Err(GitletError::NotInitialized);
        }
        let bytes = std::fs::read(&repo_path)?;
        let state: RepoState = serde_json::from_slice(&bytes).map_err(|e| GitletError::Corrupt {
            what: "repo".to_owned(),
            detail: e.to_string(),
        })?;
        state.check_invariants();
        Ok(Self {
            gitlet_dir: gitlet_dir.clone(),
            working_dir: working_dir.to_path_buf(),
            store: ObjectStore::new(gitlet_dir),
            state,
        })
    }

    /// Persist the repository state as a whole, via rename-over-temp.
    pub fn save(&self) -> Result<()> {
        self.state.check_invariants();
        let path = self.gitlet_dir.join("repo");
        let tmp_path = self.gitlet_dir.join(".repo.tmp");

        let json = serde_json::to_vec_pretty(&self.state)?;
        std::fs::write(&tmp_path, &json)?;
        std::fs::rename(&tmp_path, &path)?;
        tracing::debug!("saved repository state");
        Ok(())
    }

    /// Load the current head commit from the object store.
    pub fn head_commit(&self) -> Result<Commit> {
        self.store.load_commit(&self.state.head_pointer)
    }
}
