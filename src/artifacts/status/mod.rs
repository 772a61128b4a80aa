//! Working tree status classification
//!
//! Compares the three layers (working tree, staging segment, last-commit
//! tree) and sorts every path into staged-for-commit, modified-not-staged
//! and untracked. A path may land in more than one set at once (staged
//! differently from the head commit *and* modified again since staging).

pub mod inspector;

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Result of a status run. The sets are independent classifications, not a
/// partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Paths whose staged digest differs from (or is absent in) the head
    /// commit's tree: what the next commit would record.
    pub staged: BTreeSet<PathBuf>,
    /// Staged paths whose working-tree content no longer matches the staged
    /// digest, including staged-then-deleted files.
    pub modified: BTreeSet<PathBuf>,
    /// Working-tree files that do not appear in the staging segment.
    pub untracked: BTreeSet<PathBuf>,
}

impl StatusReport {
    /// True when nothing is staged and nothing tracked has changed.
    /// Untracked files alone do not make a tree dirty.
    pub fn has_tracked_changes(&self) -> bool {
        !self.staged.is_empty() || !self.modified.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_tracked_changes() && self.untracked.is_empty()
    }
}
