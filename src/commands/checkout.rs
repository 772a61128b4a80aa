use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::RepoError;
use std::io::Write;

impl Repository {
    /// Switch the active branch. This is a metadata-only operation: HEAD
    /// and the handle's head cache move, working-tree files are never
    /// rewritten.
    pub fn checkout(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        if !self.refs().branch_exists(&branch_name) {
            return Err(RepoError::BranchNotFound(branch_name.to_string()).into());
        }

        self.refs().set_head_branch(&branch_name)?;
        // the no-op commit guard must now compare against the new tip
        self.refresh_head_tree()?;

        writeln!(self.writer(), "Switched to branch {branch_name}")?;

        Ok(())
    }
}
