//! Tree object
//!
//! A tree is the snapshot a commit records: the current staging segment,
//! frozen. Its content is the raw segment text, one `<digest> <path>` line
//! per entry, in staging order (never sorted), duplicates already collapsed.
//!
//! On disk: `tree <size>\0<lines>`, stored uncompressed. Two identical
//! snapshots collapse to the same tree digest through the content store.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::stage::{StageEntry, StageSegment};
use bytes::Bytes;
use std::io::{BufRead, Write};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: Vec<StageEntry>,
}

impl Tree {
    /// Freeze the current staging segment into a tree. The segment's order
    /// is preserved verbatim; an empty segment means there is no snapshot
    /// to build and no tree object is ever written for it.
    pub fn build(segment: &StageSegment) -> Self {
        Tree {
            entries: segment.iter().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &StageEntry> {
        self.entries.iter()
    }

    pub fn digest_for(&self, path: &Path) -> Option<&ObjectId> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| &entry.oid)
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        for entry in &self.entries {
            writeln!(content_bytes, "{}", entry.to_line())?;
        }

        let mut tree_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        tree_bytes.write_all(header.as_bytes())?;
        tree_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = Vec::new();

        for line in reader.lines() {
            let line = line?;
            entries.push(StageEntry::parse_line(&line)?);
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn oid(filler: char) -> ObjectId {
        ObjectId::try_parse(filler.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn serialization_preserves_staging_order() {
        let segment = StageSegment::collapse(vec![
            StageEntry::new(PathBuf::from("z.txt"), oid('1')),
            StageEntry::new(PathBuf::from("a.txt"), oid('2')),
        ]);
        let tree = Tree::build(&segment);
        let bytes = tree.serialize().unwrap();

        let content = std::str::from_utf8(&bytes).unwrap();
        let (_, body) = content.split_once('\0').unwrap();
        // z.txt was staged first and stays first, no sorting
        assert!(body.find("z.txt").unwrap() < body.find("a.txt").unwrap());
    }

    #[test]
    fn identical_snapshots_collapse_to_one_digest() {
        let segment = StageSegment::collapse(vec![StageEntry::new(
            PathBuf::from("a.txt"),
            oid('a'),
        )]);

        let first = Tree::build(&segment).object_id().unwrap();
        let second = Tree::build(&segment).object_id().unwrap();
        assert_eq!(first, second);
    }
}
