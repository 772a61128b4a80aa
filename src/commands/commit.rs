use crate::areas::repository::Repository;
use crate::artifacts::core::RepoError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Freeze the staged snapshot into a commit and advance the active
    /// branch to it.
    ///
    /// Fails with [`RepoError::NothingToCommit`] when the staging segment
    /// is empty, or when the freshly built tree digest equals the cached
    /// head tree digest: committing the exact same state twice in a row
    /// must not mint a duplicate history node, even though the timestamp
    /// would make the commit digest unique.
    pub fn commit(&mut self, message: &str, author: &str) -> anyhow::Result<ObjectId> {
        let Some(tree_oid) = self.write_tree()? else {
            return Err(RepoError::NothingToCommit.into());
        };

        if Some(&tree_oid) == self.head_tree().as_ref() {
            return Err(RepoError::NothingToCommit.into());
        }

        let parent = self.refs().read_head()?;
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };

        let commit = Commit::new(
            parent,
            tree_oid.clone(),
            author.to_string(),
            chrono::Local::now().fixed_offset(),
            message.trim().to_string(),
        );

        let commit_oid = self.store().store(&commit)?;
        self.refs().update_head(&commit_oid)?;
        self.set_head_tree(Some(tree_oid));

        writeln!(
            self.writer(),
            "[{}{}] {}",
            is_root,
            commit_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_oid)
    }
}
