//! Commit object
//!
//! A commit links a tree snapshot into history: parent digest (none for the
//! root commit), author, committer, timestamp and message. Parents form a
//! singly linked list back to the repository's first commit; a commit can
//! only ever reference a commit that already existed when it was written,
//! so the chain is acyclic by construction.
//!
//! On disk: `commit <size>\0<json>`, stored uncompressed. The JSON schema
//! is canonical (keys emitted in sorted order), so the digest of a commit
//! is a pure function of its fields. The digest itself is never part of the
//! record.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
// Fields stay in alphabetical order: serde_json emits keys in declaration
// order, and the canonical (key-sorted) form is what gets hashed.
pub struct Commit {
    author: String,
    committer: String,
    message: String,
    parent: Option<ObjectId>,
    time: chrono::DateTime<chrono::FixedOffset>,
    tree: ObjectId,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        tree: ObjectId,
        author: String,
        time: chrono::DateTime<chrono::FixedOffset>,
        message: String,
    ) -> Self {
        Commit {
            committer: author.clone(),
            author,
            message,
            parent,
            time,
            tree,
        }
    }

    /// First line of the message, for short-form display.
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn tree(&self) -> &ObjectId {
        &self.tree
    }

    pub fn time(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.time
    }

    pub fn is_authored_by(&self, name: &str) -> bool {
        self.author == name
    }

    /// Whether the commit was authored within the last `days` days.
    pub fn is_authored_within_days(&self, days: u64) -> bool {
        let age = chrono::Local::now().fixed_offset() - self.time;
        age < chrono::Duration::days(days as i64)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content_bytes =
            serde_json::to_vec(self).context("Unable to serialize commit record")?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        serde_json::from_reader(reader).context("Invalid commit record")
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
