use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::status::StatusReport;
use derive_new::new;

/// The status diff engine. Reads the working tree, the staging segment and
/// the head commit's tree, and never mutates any of them. Every run scans
/// from scratch; no state survives between invocations, so the report can
/// never be stale.
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl Inspector<'_> {
    pub fn report(&self) -> anyhow::Result<StatusReport> {
        let segment = self.repository.staging().current_segment()?;
        let head_tree = self.load_head_tree()?;

        let mut report = StatusReport::default();

        for entry in segment.iter() {
            // staged-for-commit: digest differs from what the head records
            if head_tree.digest_for(&entry.path) != Some(&entry.oid) {
                report.staged.insert(entry.path.clone());
            }

            // modified-not-staged: reworked or deleted since staging
            if self.repository.workspace().contains(&entry.path) {
                let blob = self.repository.workspace().parse_blob(&entry.path)?;
                if blob.object_id()? != entry.oid {
                    report.modified.insert(entry.path.clone());
                }
            } else {
                report.modified.insert(entry.path.clone());
            }
        }

        // untracked: full recursive walk, skipping the control directory
        for path in self.repository.workspace().list_files()? {
            if !segment.contains(&path) {
                report.untracked.insert(path);
            }
        }

        Ok(report)
    }

    /// The snapshot the active branch's head commit records; empty when the
    /// branch has no commits yet.
    fn load_head_tree(&self) -> anyhow::Result<Tree> {
        match self.repository.refs().read_head()? {
            Some(head_oid) => {
                let commit = self.repository.store().parse_commit(&head_oid)?;
                self.repository.store().parse_tree(commit.tree())
            }
            None => Ok(Tree::default()),
        }
    }
}
