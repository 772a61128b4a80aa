//! The staging log
//!
//! A single append-only text file at `.keep/stage`. Every `stage` call
//! opens a fresh segment (one marker line followed by the batch's entries),
//! and only the most recent segment is authoritative; everything before
//! it is dead history that is never rewritten. The reader scans backward
//! from the end of the file to the last marker.
//!
//! The log is owned exclusively by the repository handle; no other
//! component writes it. No locking is provided, so concurrent writers can
//! corrupt the last-segment invariant; single-actor use is assumed.

use crate::artifacts::stage::{SEGMENT_MARKER, StageEntry, StageSegment};
use anyhow::Context;
use std::io::Write;
use std::path::Path;

#[derive(Debug)]
pub struct StagingLog {
    path: Box<Path>,
}

impl StagingLog {
    pub fn new(path: Box<Path>) -> Self {
        StagingLog { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one new segment: a marker line, then every entry of the batch
    /// in insertion order. Duplicate paths within the batch are written as
    /// they come; readers collapse them with last-entry-wins.
    pub fn append_segment(&self, entries: &[StageEntry]) -> anyhow::Result<()> {
        let mut log_file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .context(format!(
                "Unable to open staging log {}",
                self.path.display()
            ))?;

        writeln!(log_file, "{SEGMENT_MARKER}")?;
        for entry in entries {
            writeln!(log_file, "{}", entry.to_line())?;
        }

        Ok(())
    }

    /// The authoritative segment: all entries after the most recent marker,
    /// duplicates collapsed with last-entry-wins. A repository that has
    /// never staged anything has no log file and an empty segment.
    pub fn current_segment(&self) -> anyhow::Result<StageSegment> {
        if !self.path.exists() {
            return Ok(StageSegment::default());
        }

        let content = std::fs::read_to_string(&self.path).context(format!(
            "Unable to read staging log {}",
            self.path.display()
        ))?;

        let mut tail = Vec::new();
        for line in content.lines().rev() {
            if line == SEGMENT_MARKER {
                break;
            }
            tail.push(line);
        }

        let entries = tail
            .into_iter()
            .rev()
            .map(StageEntry::parse_line)
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(StageSegment::collapse(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::core::RepoError;
    use crate::artifacts::objects::object_id::ObjectId;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn oid(filler: char) -> ObjectId {
        ObjectId::try_parse(filler.to_string().repeat(40)).unwrap()
    }

    fn log_in(dir: &Path) -> StagingLog {
        StagingLog::new(dir.join("stage").into_boxed_path())
    }

    #[test]
    fn missing_log_file_means_an_empty_segment() {
        let dir = assert_fs::TempDir::new().unwrap();
        let segment = log_in(dir.path()).current_segment().unwrap();
        assert!(segment.is_empty());
    }

    #[test]
    fn only_the_most_recent_segment_is_authoritative() {
        let dir = assert_fs::TempDir::new().unwrap();
        let log = log_in(dir.path());

        log.append_segment(&[StageEntry::new(PathBuf::from("a.txt"), oid('a'))])
            .unwrap();
        log.append_segment(&[StageEntry::new(PathBuf::from("b.txt"), oid('b'))])
            .unwrap();

        let segment = log.current_segment().unwrap();
        assert_eq!(segment.len(), 1);
        assert_eq!(segment.digest_for(Path::new("b.txt")), Some(&oid('b')));
        assert!(!segment.contains(Path::new("a.txt")));
    }

    #[test]
    fn restaging_a_path_within_one_batch_keeps_the_last_digest() {
        let dir = assert_fs::TempDir::new().unwrap();
        let log = log_in(dir.path());

        log.append_segment(&[
            StageEntry::new(PathBuf::from("a.txt"), oid('1')),
            StageEntry::new(PathBuf::from("a.txt"), oid('2')),
        ])
        .unwrap();

        let segment = log.current_segment().unwrap();
        assert_eq!(segment.len(), 1);
        assert_eq!(segment.digest_for(Path::new("a.txt")), Some(&oid('2')));
    }

    #[test]
    fn a_garbled_entry_is_a_fatal_parse_error() {
        let dir = assert_fs::TempDir::new().unwrap();
        let log = log_in(dir.path());

        std::fs::write(log.path(), "---\nnot a valid entry line\n").unwrap();

        let err = log.current_segment().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepoError>(),
            Some(RepoError::CorruptStagingLog(_))
        ));
    }
}
