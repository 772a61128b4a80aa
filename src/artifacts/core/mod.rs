//! Error taxonomy for repository operations
//!
//! Operations return `anyhow::Result`; failures a caller may want to branch
//! on carry one of these variants, recoverable with
//! `err.downcast_ref::<RepoError>()`. Everything else (unwritable store,
//! permission problems) stays a plain I/O error with context attached.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    /// A path handed to `stage` does not exist in the working tree.
    #[error("path not found in working tree: {}", .0.display())]
    PathNotFound(PathBuf),

    /// No object with the requested digest exists in the store.
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// The named branch has no reference file.
    #[error("Branch {0} does not exist")]
    BranchNotFound(String),

    /// A branch with that name already has a reference file. Reported to
    /// the user, not fatal.
    #[error("Branch {0} already exists")]
    BranchAlreadyExists(String),

    /// The staged snapshot is identical to what the branch tip already
    /// records, or nothing has been staged at all.
    #[error("nothing to commit")]
    NothingToCommit,

    /// A staging log line that is neither a segment marker nor a
    /// well-formed entry. Fatal; the log is not self-healing.
    #[error("corrupt staging log entry: {0:?}")]
    CorruptStagingLog(String),
}
