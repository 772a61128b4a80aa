//! Staging log entries and segments
//!
//! The staging log is an append-only text file. Each `stage` call opens a
//! new segment: one marker line followed by one entry line per staged path.
//! Only the entries after the most recent marker are authoritative; older
//! segments are dead history.
//!
//! Entry line: `<40-hex-digest> <relative-path>` (digest first, so paths may
//! contain spaces). Marker line: `---`.

use crate::artifacts::core::RepoError;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Marker line opening a new segment in the staging log.
pub const SEGMENT_MARKER: &str = "---";

/// One `path -> blob digest` record in the staging log.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StageEntry {
    pub path: PathBuf,
    pub oid: ObjectId,
}

impl StageEntry {
    /// Render the log line for this entry. Trees store the raw segment
    /// text, so this is also the tree object's line syntax.
    pub fn to_line(&self) -> String {
        format!("{} {}", self.oid, self.path.display())
    }

    /// Parse a log line. Malformed lines are a fatal
    /// [`RepoError::CorruptStagingLog`], never skipped.
    pub fn parse_line(line: &str) -> anyhow::Result<Self> {
        let (digest, path) = line
            .split_once(' ')
            .ok_or_else(|| RepoError::CorruptStagingLog(line.to_string()))?;

        if path.is_empty() {
            return Err(RepoError::CorruptStagingLog(line.to_string()).into());
        }

        let oid = ObjectId::try_parse(digest.to_string())
            .map_err(|_| RepoError::CorruptStagingLog(line.to_string()))?;

        Ok(Self::new(PathBuf::from(path), oid))
    }
}

/// The authoritative slice of the staging log: the entries after the most
/// recent segment marker, duplicates collapsed.
#[derive(Debug, Clone, Default)]
pub struct StageSegment {
    entries: Vec<StageEntry>,
}

impl StageSegment {
    /// Collapse raw segment entries: a path staged twice within one batch
    /// keeps only its last entry, at the position of that last occurrence.
    pub fn collapse(entries: Vec<StageEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut collapsed = entries
            .into_iter()
            .rev()
            .filter(|entry| seen.insert(entry.path.clone()))
            .collect::<Vec<_>>();
        collapsed.reverse();

        StageSegment { entries: collapsed }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.digest_for(path).is_some()
    }

    pub fn digest_for(&self, path: &Path) -> Option<&ObjectId> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| &entry.oid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn oid(filler: char) -> ObjectId {
        ObjectId::try_parse(filler.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn last_entry_wins_within_a_segment() {
        let segment = StageSegment::collapse(vec![
            StageEntry::new(PathBuf::from("a.txt"), oid('a')),
            StageEntry::new(PathBuf::from("b.txt"), oid('b')),
            StageEntry::new(PathBuf::from("a.txt"), oid('c')),
        ]);

        assert_eq!(segment.len(), 2);
        assert_eq!(segment.digest_for(Path::new("a.txt")), Some(&oid('c')));

        // the surviving a.txt entry sits at its last staged position
        let order = segment
            .iter()
            .map(|entry| entry.path.clone())
            .collect::<Vec<_>>();
        assert_eq!(order, vec![PathBuf::from("b.txt"), PathBuf::from("a.txt")]);
    }

    #[test]
    fn entry_lines_round_trip() {
        let entry = StageEntry::new(PathBuf::from("dir/with space.txt"), oid('1'));
        let parsed = StageEntry::parse_line(&entry.to_line()).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn malformed_lines_are_fatal() {
        for line in ["not-a-digest a.txt", "deadbeef", ""] {
            let err = StageEntry::parse_line(line).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<RepoError>(),
                Some(RepoError::CorruptStagingLog(_))
            ));
        }
    }
}
