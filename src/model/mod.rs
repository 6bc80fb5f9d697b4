//! Core value types: object ids, blobs, and commits.

pub mod blob;
pub mod commit;
pub mod types;

pub use blob::Blob;
pub use commit::Commit;
pub use types::ObjectId;
