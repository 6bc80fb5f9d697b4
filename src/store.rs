//! The content-addressed object store: write-once blobs and commits keyed by digest.
//!
//! Both objects live under `<root>/objects/<id[0:2]>/<id[2:40]>`. Writes are
//! write-if-absent, which gives content-addressed deduplication for free:
//! storing identical content twice is a no-op past the first write.

use std::path::{Path, PathBuf};

use crate::digest::{digest_bytes, fanout_dir, object_path, MIN_PARTIAL_LEN};
use crate::error::{GitletError, Result};
use crate::model::commit::Commit;
use crate::model::types::ObjectId;

/// A content-addressed object store rooted at `<root>/objects`.
pub struct ObjectStore {
    root: PathBuf,
}

impl ObjectStore {
    /// Open a store rooted at `root` (the `.gitlet` directory). Does not
    /// create anything on disk — see [`ObjectStore::init`] for that.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the `objects/` directory. Called once by `init`.
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(self.root.join("objects"))?;
        Ok(())
    }

    /// `true` if an object with this id is already stored.
    #[must_use]
    pub fn has(&self, id: &ObjectId) -> bool {
        object_path(&self.root, id.as_str()).is_file()
    }

    fn write_if_absent(&self, id: &ObjectId, bytes: &[u8]) -> Result<()> {
        let path = object_path(&self.root, id.as_str());
        if path.is_file() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, bytes)?;
        tracing::debug!(object_id = %id, "wrote object");
        Ok(())
    }

    /// Store raw bytes as a blob, returning its id. Idempotent.
    pub fn put_blob_bytes(&self, bytes: &[u8]) -> Result<ObjectId> {
        let id = ObjectId::new_unchecked(digest_bytes(bytes));
        self.write_if_absent(&id, bytes)?;
        Ok(id)
    }

    /// Read `filename` from `working_dir`, store its bytes as a blob, and
    /// return its id.
    ///
    /// # Errors
    /// Returns [`GitletError::FileDoesNotExist`] if the file is absent.
    pub fn put_blob_file(&self, working_dir: &Path, filename: &str) -> Result<ObjectId> {
        let bytes = std::fs::read(working_dir.join(filename))
            .map_err(|_| GitletError::FileDoesNotExist)?;
        self.put_blob_bytes(&bytes)
    }

    /// Load a blob's bytes by id.
    pub fn load_blob(&self, id: &ObjectId) -> Result<Vec<u8>> {
        let path = object_path(&self.root, id.as_str());
        std::fs::read(&path).map_err(|_| GitletError::Corrupt {
            what: format!("blob {id}"),
            detail: "missing from object store".to_owned(),
        })
    }

    /// Serialize and store a commit, returning its id. Idempotent: two
    /// commits with identical fields collapse to the same stored object.
    pub fn put_commit(&self, commit: &Commit) -> Result<ObjectId> {
        let id = commit.id();
        self.write_if_absent(&id, &commit.canonical_bytes())?;
        Ok(id)
    }

    /// Load and deserialize a commit by id.
    ///
    /// # Errors
    /// Returns [`GitletError::NoCommitWithThatId`] if no such object is stored.
    pub fn load_commit(&self, id: &ObjectId) -> Result<Commit> {
        let path = object_path(&self.root, id.as_str());
        let bytes = std::fs::read(&path).map_err(|_| GitletError::NoCommitWithThatId)?;
        serde_json::from_slice(&bytes).map_err(|_| GitletError::NoCommitWithThatId)
    }

    /// Resolve a (possibly abbreviated) object id prefix to a full id.
    ///
    /// Full-length prefixes are returned as-is (after validation). Prefixes
    /// shorter than [`MIN_PARTIAL_LEN`] are rejected. Otherwise the fanout
    /// folder `objects/<prefix[0:2]>/` is scanned for a unique filename
    /// starting with `prefix[2:]`.
    ///
    /// # Errors
    /// Returns [`GitletError::NoCommitWithThatId`] if the prefix is too
    /// short, the fanout folder doesn't exist, there is no match, or there is
    /// more than one match (ambiguity is treated as not-found — see
    /// DESIGN.md's resolved Open Question).
    pub fn resolve_partial(&self, prefix: &str) -> Result<ObjectId> {
        if prefix.len() == crate::digest::ID_LEN {
            return ObjectId::new(prefix).map_err(|_| GitletError::NoCommitWithThatId);
        }
        if prefix.len() < MIN_PARTIAL_LEN {
            return Err(GitletError::NoCommitWithThatId);
        }
        if !prefix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
            return Err(GitletError::NoCommitWithThatId);
        }
        let (folder, rest) = prefix.split_at(2);
        let dir = fanout_dir(&self.root, folder);
        let entries = std::fs::read_dir(&dir).map_err(|_| GitletError::NoCommitWithThatId)?;

        let mut matches = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| GitletError::NoCommitWithThatId)?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(rest) {
                matches.push(format!("{folder}{name}"));
            }
        }

        match matches.len() {
            1 => ObjectId::new(matches.remove(0)).map_err(|_| GitletError::NoCommitWithThatId),
            _ => Err(GitletError::NoCommitWithThatId),
        }
    }
}
