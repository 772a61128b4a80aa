use crate::areas::repository::Repository;
use crate::artifacts::status::StatusReport;
use crate::artifacts::status::inspector::Inspector;
use colored::Colorize;
use std::io::Write;

// Terminology:
// - staged files: staged digest differs from the head commit's tree
// - modified files: staged, but reworked or deleted in the workspace since
// - untracked files: present in the workspace, absent from the segment
impl Repository {
    /// Classify every path by comparing working tree, staging segment and
    /// head tree. Recomputed from scratch on every call.
    pub fn status(&self) -> anyhow::Result<StatusReport> {
        Inspector::new(self).report()
    }

    pub fn print_status(&self) -> anyhow::Result<()> {
        let report = self.status()?;

        for path in &report.staged {
            writeln!(self.writer(), "{}  {}", "A".green(), path.display())?;
        }

        for path in &report.modified {
            let marker = if self.workspace().contains(path) {
                "M".red()
            } else {
                "D".red()
            };
            writeln!(self.writer(), " {} {}", marker, path.display())?;
        }

        for path in &report.untracked {
            writeln!(self.writer(), "?? {}", path.display())?;
        }

        if report.is_empty() {
            writeln!(self.writer(), "No changes to files.")?;
        }

        Ok(())
    }

    /// Whether the working tree carries uncommitted changes to tracked
    /// files. Untracked files alone do not count.
    pub fn is_modified(&self) -> anyhow::Result<bool> {
        Ok(self.status()?.has_tracked_changes())
    }
}
