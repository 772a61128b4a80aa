//! Commit history traversal
//!
//! History is a singly linked list: each commit points at its parent, back
//! to the root commit whose parent is null. [`CommitWalk`] walks it lazily,
//! newest first, re-reading each commit from the store as it goes. The walk
//! is finite because commits only ever reference strictly earlier commits.

use crate::areas::store::ObjectStore;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Lazy, non-restartable walk from a branch head down to the root commit.
#[derive(new)]
pub struct CommitWalk<'s> {
    store: &'s ObjectStore,
    next: Option<ObjectId>,
}

impl Iterator for CommitWalk<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next.take()?;

        match self.store.parse_commit(&oid) {
            Ok(commit) => {
                self.next = commit.parent().cloned();
                Some(Ok((oid, commit)))
            }
            // a broken parent pointer ends the walk after reporting it
            Err(err) => Some(Err(err)),
        }
    }
}
