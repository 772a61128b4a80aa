use crate::areas::repository::Repository;
use crate::artifacts::log::CommitWalk;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

const RECENTLY_AUTHORED_DAYS: u64 = 7;

impl Repository {
    /// Lazy walk over the active branch's history, newest first. Each call
    /// starts a fresh traversal from disk.
    pub fn walk_history(&self) -> anyhow::Result<CommitWalk<'_>> {
        Ok(CommitWalk::new(self.store(), self.refs().read_head()?))
    }

    /// Print the commit history, then a short summary of the head commit's
    /// recency and author.
    pub fn log(&self) -> anyhow::Result<()> {
        let mut head_commit: Option<(ObjectId, Commit)> = None;

        for item in self.walk_history()? {
            let (commit_oid, commit) = item?;

            writeln!(self.writer(), "commit {commit_oid}")?;
            writeln!(self.writer(), "Author: {}", commit.author())?;
            writeln!(
                self.writer(),
                "Date:   {}",
                commit.time().format("%a %b %-d %H:%M:%S %Y %z")
            )?;
            writeln!(self.writer())?;
            writeln!(self.writer(), "    {}", commit.message())?;
            writeln!(self.writer())?;

            if head_commit.is_none() {
                head_commit = Some((commit_oid, commit));
            }
        }

        match head_commit {
            None => writeln!(self.writer(), "No commits yet")?,
            Some((head_oid, head)) => {
                let recency = if head.is_authored_within_days(RECENTLY_AUTHORED_DAYS) {
                    "was authored in the last week"
                } else {
                    "was not authored in the last week"
                };
                writeln!(self.writer(), "Commit {head_oid} {recency}")?;
                writeln!(self.writer(), "Commit was authored by {}", head.author())?;
            }
        }

        Ok(())
    }

    /// Whether the head commit was authored within the last `within_days`
    /// days. False when the branch has no commits.
    pub fn is_authored_recently(&self, within_days: u64) -> anyhow::Result<bool> {
        Ok(self
            .head_commit()?
            .is_some_and(|commit| commit.is_authored_within_days(within_days)))
    }

    /// Whether the head commit was authored by `name`. False when the
    /// branch has no commits.
    pub fn is_authored_by(&self, name: &str) -> anyhow::Result<bool> {
        Ok(self
            .head_commit()?
            .is_some_and(|commit| commit.is_authored_by(name)))
    }

    fn head_commit(&self) -> anyhow::Result<Option<Commit>> {
        match self.refs().read_head()? {
            Some(head_oid) => Ok(Some(self.store().parse_commit(&head_oid)?)),
            None => Ok(None),
        }
    }
}
