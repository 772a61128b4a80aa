use crate::areas::repository::Repository;
use crate::artifacts::stage::StageEntry;
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    /// Snapshot the given paths into a new staging segment. Directories
    /// expand to the files beneath them.
    ///
    /// The batch is atomic against bad input: every path is resolved before
    /// anything is written, so a missing path fails the whole call and
    /// leaves the staging log untouched. Blob writes are idempotent, and
    /// the segment marker and entries land last in one append, so a batch
    /// that fails later (I/O) leaves no observable staging state either.
    pub fn stage(&mut self, paths: &[PathBuf]) -> anyhow::Result<()> {
        // resolve and validate the whole batch up front
        let file_paths = paths
            .iter()
            .map(|path| self.workspace().expand(path))
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        let mut entries = Vec::with_capacity(file_paths.len());
        for file_path in file_paths {
            let blob = self.workspace().parse_blob(&file_path)?;
            let blob_oid = self.store().store(&blob)?;

            entries.push(StageEntry::new(file_path, blob_oid));
        }

        self.staging().append_segment(&entries)?;

        for entry in &entries {
            writeln!(self.writer(), "Staged {}", entry.path.display())?;
        }

        Ok(())
    }
}
