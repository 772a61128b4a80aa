use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;
use std::io::Write;

pub const DEFAULT_BRANCH: &str = "master";

impl Repository {
    /// Create the on-disk layout. Idempotent: rerunning against an existing
    /// repository loads its state and overwrites nothing.
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            writeln!(
                self.writer(),
                "Reinitialized existing repository in {}",
                self.path().display()
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.store().objects_path())
            .context("Failed to create .keep/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .keep/refs/heads directory")?;

        fs::create_dir_all(self.refs().tags_path())
            .context("Failed to create .keep/refs/tags directory")?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .set_head_branch(&default_branch)
            .context("Failed to create initial HEAD reference")?;
        self.refs()
            .create_branch(&default_branch, None)
            .context("Failed to create default branch reference")?;

        // an empty staging log and an empty segment are equivalent; the
        // file is created up front so the layout is complete
        fs::write(self.staging().path(), b"").context("Failed to create .keep/stage file")?;

        writeln!(
            self.writer(),
            "Initialized empty repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
