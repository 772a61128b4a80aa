//! Branch references and the HEAD pointer
//!
//! A branch is one file under `.keep/refs/heads/` whose content is the
//! digest of its tip commit; an empty (or absent) file is a branch with no
//! commits yet. `HEAD` is a symbolic reference (`ref: refs/heads/<name>`)
//! naming the active branch. Exactly one branch is active at a time.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::RepoError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::Path;

/// Pattern for the symbolic reference stored in HEAD
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the control directory (`.keep`)
    path: Box<Path>,
}

impl Refs {
    /// The branch HEAD currently points at.
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let content = std::fs::read_to_string(self.head_path())
            .context("Unable to read HEAD reference")?;
        let content = content.trim();

        let symref_match = regex::Regex::new(SYMREF_REGEX)?
            .captures(content)
            .with_context(|| format!("malformed HEAD reference {content:?}"))?;

        BranchName::try_parse(symref_match[1].to_string())
    }

    /// Point HEAD at the named branch.
    pub fn set_head_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        std::fs::write(
            self.head_path(),
            format!("ref: refs/heads/{branch_name}"),
        )
        .context("Unable to write HEAD reference")
    }

    /// The tip digest of the active branch; None while it has no commits.
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_branch(&self.current_branch()?)
    }

    /// Advance the active branch to a new tip.
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_name = self.current_branch()?;
        let branch_path = self.heads_path().join(branch_name.as_ref());

        std::fs::write(&branch_path, oid.as_ref()).context(format!(
            "Unable to write branch reference {}",
            branch_path.display()
        ))
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.heads_path().join(branch_name.as_ref());

        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path).context(format!(
            "Unable to read branch reference {}",
            branch_path.display()
        ))?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ObjectId::try_parse(content.to_string())?))
        }
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.heads_path().join(branch_name.as_ref()).exists()
    }

    /// Create a branch reference pointing at the given commit (or at
    /// nothing, for a repository without commits). A second branch with the
    /// same name is refused with [`RepoError::BranchAlreadyExists`].
    pub fn create_branch(
        &self,
        branch_name: &BranchName,
        source_oid: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(branch_name.as_ref());

        if branch_path.exists() {
            return Err(RepoError::BranchAlreadyExists(branch_name.to_string()).into());
        }

        std::fs::create_dir_all(branch_path.parent().with_context(|| {
            format!(
                "failed to resolve parent directory for branch reference {}",
                branch_path.display()
            )
        })?)?;

        let content = source_oid.map(|oid| oid.as_ref()).unwrap_or_default();
        std::fs::write(&branch_path, content).context(format!(
            "Unable to write branch reference {}",
            branch_path.display()
        ))
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }
}
