use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::RepoError;
use std::io::Write;

impl Repository {
    /// Create a branch pointing at the current head. The active branch is
    /// left unchanged. A duplicate name is reported, not fatal.
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.refs().read_head()?;

        match self.refs().create_branch(&branch_name, head_oid.as_ref()) {
            Ok(()) => {
                writeln!(self.writer(), "Created new branch {branch_name}")?;
                Ok(())
            }
            Err(err) => match err.downcast_ref::<RepoError>() {
                Some(RepoError::BranchAlreadyExists(_)) => {
                    writeln!(self.writer(), "{err}")?;
                    Ok(())
                }
                _ => Err(err),
            },
        }
    }

    pub fn active_branch(&self) -> anyhow::Result<BranchName> {
        self.refs().current_branch()
    }

    pub fn show_active_branch(&self) -> anyhow::Result<()> {
        let branch_name = self.active_branch()?;
        writeln!(self.writer(), "Current active branch: {branch_name}")?;

        Ok(())
    }
}
