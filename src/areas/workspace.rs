//! Working directory file system operations
//!
//! The workspace reads the user's files; it never touches the control
//! directory and nothing in this core ever writes working-tree files.

use crate::artifacts::core::RepoError;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".keep", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<String> {
        let full_path = self.path.join(file_path);

        if !full_path.is_file() {
            return Err(RepoError::PathNotFound(file_path.to_path_buf()).into());
        }

        std::fs::read_to_string(&full_path)
            .context(format!("Unable to read file {}", full_path.display()))
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        let data = self.read_file(file_path)?;
        Ok(Blob::new(data))
    }

    /// Every file in the working tree as a repository-relative path,
    /// recursively, skipping the control directory. The walk runs fresh on
    /// every call; no scan state is kept between invocations.
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        Ok(WalkDir::new(self.path.as_ref())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
            .collect::<Vec<_>>())
    }

    /// Expand one user-supplied path into workspace-relative file paths: a
    /// file maps to itself, a directory to every file beneath it. A path
    /// that does not exist fails the whole call.
    pub fn expand(&self, path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let full_path = self.path.join(path);

        if !full_path.exists() {
            return Err(RepoError::PathNotFound(path.to_path_buf()).into());
        }

        let full_path = full_path
            .canonicalize()
            .context(format!("Unable to resolve path {}", full_path.display()))?;

        if full_path.is_dir() {
            Ok(WalkDir::new(&full_path)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
                .collect::<Vec<_>>())
        } else {
            Ok(vec![
                full_path
                    .strip_prefix(self.path.as_ref())
                    .map(PathBuf::from)
                    .context(format!("path {} escapes the workspace", path.display()))?,
            ])
        }
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<PathBuf> {
        if path.is_file() && !Self::is_ignored(path) {
            Some(path.strip_prefix(self.path.as_ref()).ok()?.to_path_buf())
        } else {
            None
        }
    }
}
