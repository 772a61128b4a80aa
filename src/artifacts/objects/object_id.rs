//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character hexadecimal strings and are the sole identity
//! of stored objects. Two objects with identical type and content always
//! collide to the same ID.
//!
//! Objects live at `.keep/objects/<first-2-chars>/<remaining-38-chars>`; the
//! two-character fan-out is pure bucketing with no semantic meaning.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A 40-character hexadecimal SHA-1 digest identifying a stored object.
///
/// Serializes as its hex string inside commit records; deserialization
/// re-validates length and character set.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Split the digest as `XX/YYYY...` for the store's fan-out layout.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters, for display.
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl TryFrom<String> for ObjectId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> anyhow::Result<Self> {
        Self::try_parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(oid: ObjectId) -> Self {
        oid.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
