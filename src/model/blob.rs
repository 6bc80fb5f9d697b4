//! `Blob` — opaque file content at one point in time, keyed by content digest.

use crate::digest::digest_bytes;
use crate::model::types::ObjectId;

/// An immutable snapshot of one file's bytes.
///
/// Two blobs with identical content are equal and share an id: blob identity
/// is purely a function of content, never of filename or metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    content: Vec<u8>,
}

impl Blob {
    /// Wrap raw bytes as a blob.
    #[must_use]
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    /// The blob's content-addressed id.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        ObjectId::new_unchecked(digest_bytes(&self.content))
    }

    /// Borrow the raw bytes.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Consume the blob, returning its raw bytes.
    #[must_use]
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}
