//! `ObjectId` and `ParentRef` — validated identifiers used throughout the object model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::digest::ID_LEN;

/// The literal sentinel written in place of a missing parent (only valid for
/// the initial commit's single parent slot).
pub const NONE_SENTINEL: &str = "none";

/// A validated 40-character lowercase hex object id (blob or commit).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Validate and wrap a hex string as an `ObjectId`.
    ///
    /// # Errors
    /// Returns a description of the problem if `s` is not exactly [`ID_LEN`]
    /// lowercase hex characters.
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Wrap a hex string without validation.
    ///
    /// Used internally once a digest has been freshly computed, where the
    /// format is already known to be correct.
    #[must_use]
    pub(crate) fn new_unchecked(s: String) -> Self {
        debug_assert!(Self::validate(&s).is_ok());
        Self(s)
    }

    /// Return the id as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first two hex characters (fanout folder name).
    #[must_use]
    pub fn fanout_prefix(&self) -> &str {
        &self.0[0..2]
    }

    /// The remaining hex characters after the fanout prefix.
    #[must_use]
    pub fn fanout_remainder(&self) -> &str {
        &self.0[2..]
    }

    /// A shortened, 7-character form used in merge-commit log lines.
    #[must_use]
    pub fn short(&self) -> &str {
        &self.0[0..7.min(self.0.len())]
    }

    fn validate(s: &str) -> Result<(), String> {
        if s.len() != ID_LEN {
            return Err(format!("expected {ID_LEN} hex characters, got {}", s.len()));
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
            return Err("must contain only lowercase hex characters (0-9, a-f)".to_owned());
        }
        Ok(())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ObjectId {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validate(&s)?;
        Ok(Self(s))
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

// ---------------------------------------------------------------------------
// ParentRef
// ---------------------------------------------------------------------------

/// A commit parent slot: either a concrete [`ObjectId`], or the `"none"`
/// sentinel (valid only for the initial commit).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ParentRef {
    /// No parent (initial commit only).
    None,
    /// A concrete parent commit id.
    Id(ObjectId),
}

impl ParentRef {
    /// Returns the commit id this parent refers to, or `None` for the sentinel.
    #[must_use]
    pub fn id(&self) -> Option<&ObjectId> {
        match self {
            Self::None => None,
            Self::Id(id) => Some(id),
        }
    }

    /// `true` if this slot is the `"none"` sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str(NONE_SENTINEL),
            Self::Id(id) => fmt::Display::fmt(id, f),
        }
    }
}

impl TryFrom<String> for ParentRef {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == NONE_SENTINEL {
            Ok(Self::None)
        } else {
            Ok(Self::Id(ObjectId::try_from(s)?))
        }
    }
}

impl From<ParentRef> for String {
    fn from(parent: ParentRef) -> Self {
        match parent {
            ParentRef::None => NONE_SENTINEL.to_owned(),
            ParentRef::Id(id) => id.into(),
        }
    }
}

impl From<ObjectId> for ParentRef {
    fn from(id: ObjectId) -> Self {
        Self::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_id() -> ObjectId {
        ObjectId::new("a".repeat(ID_LEN)).unwrap()
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(ObjectId::new("abc").is_err());
    }

    #[test]
    fn rejects_uppercase() {
        assert!(ObjectId::new("A".repeat(ID_LEN)).is_err());
    }

    #[test]
    fn accepts_valid_hex() {
        assert!(ObjectId::new("0123456789abcdef0123456789abcdef01234567").is_ok());
    }

    #[test]
    fn fanout_split() {
        let id = sample_id();
        assert_eq!(id.fanout_prefix(), "aa");
        assert_eq!(id.fanout_remainder().len(), ID_LEN - 2);
    }

    #[test]
    fn short_is_seven_chars() {
        assert_eq!(sample_id().short().len(), 7);
    }

    #[test]
    fn parent_ref_none_round_trips() {
        let json = serde_json::to_string(&ParentRef::None).unwrap();
        assert_eq!(json, "\"none\"");
        let back: ParentRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ParentRef::None);
    }

    #[test]
    fn parent_ref_id_round_trips() {
        let id = sample_id();
        let parent = ParentRef::Id(id.clone());
        let json = serde_json::to_string(&parent).unwrap();
        let back: ParentRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ParentRef::Id(id));
    }

    #[test]
    fn parent_ref_rejects_bad_hex() {
        let result: Result<ParentRef, _> = ParentRef::try_from("not-an-id".to_owned());
        assert!(result.is_err());
    }
}
