//! Content digest and object-store path derivation.
//!
//! An object id is a 40 lowercase hex character SHA-1 digest. The object store
//! fans ids out two levels deep: `<root>/objects/<id[0:2]>/<id[2:40]>`.

use std::path::PathBuf;

use sha1::{Digest, Sha1};

/// Number of hex characters in an object id (160-bit digest).
pub const ID_LEN: usize = 40;

/// Minimum prefix length accepted by [`crate::store::ObjectStore::resolve_partial`].
pub const MIN_PARTIAL_LEN: usize = 6;

/// Compute the 40-hex-character digest of a byte sequence.
#[must_use]
pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Split a full object id into its `(fanout folder, remainder)` storage path components.
///
/// # Panics
/// Panics if `id` is not exactly [`ID_LEN`] characters — callers are expected to
/// validate ids before reaching storage.
#[must_use]
pub fn object_path(root: &std::path::Path, id: &str) -> PathBuf {
    debug_assert_eq!(id.len(), ID_LEN, "object id must be {ID_LEN} hex chars");
    root.join("objects").join(&id[0..2]).join(&id[2..])
}

/// The fanout directory (`objects/<prefix>`) for a given 2-character id prefix.
#[must_use]
pub fn fanout_dir(root: &std::path::Path, prefix2: &str) -> PathBuf {
    root.join("objects").join(prefix2)
}
