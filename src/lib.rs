//! A minimal content-addressed version-control core.
//!
//! The crate tracks snapshots of a working directory as immutable objects
//! (blobs, trees, commits), keeps a staging log of what the next commit
//! should contain, and chains commits into linear branch histories. The
//! `keep` binary is a thin CLI over [`areas::repository::Repository`].

pub mod areas;
pub mod artifacts;
pub mod commands;
