//! Library-level tests for the query surface consumed by collaborators
//! that the CLI does not print directly.

use assert_fs::TempDir;
use keepsake::areas::repository::Repository;
use keepsake::artifacts::core::RepoError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::{Path, PathBuf};

mod common;

use common::command::repository_dir;
use common::file::{FileSpec, write_file};

fn open_repository(dir: &Path) -> Repository {
    Repository::new(&dir.to_string_lossy(), Box::new(std::io::sink()))
        .expect("Failed to open repository")
}

#[rstest]
fn is_initialized_flips_after_init(repository_dir: TempDir) -> anyhow::Result<()> {
    let mut repository = open_repository(repository_dir.path());

    assert!(!repository.is_initialized());
    repository.init()?;
    assert!(repository.is_initialized());

    Ok(())
}

#[rstest]
fn is_modified_tracks_staged_and_reworked_files(repository_dir: TempDir) -> anyhow::Result<()> {
    let mut repository = open_repository(repository_dir.path());
    repository.init()?;

    assert!(!repository.is_modified()?);

    // an untracked file alone does not make the tree dirty
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "content".to_string(),
    ));
    assert!(!repository.is_modified()?);

    repository.stage(&[PathBuf::from("a.txt")])?;
    assert!(repository.is_modified()?);

    repository.commit("settle", "ada")?;
    assert!(!repository.is_modified()?);

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "reworked".to_string(),
    ));
    assert!(repository.is_modified()?);

    Ok(())
}

#[rstest]
fn authorship_queries_cover_the_head_commit(repository_dir: TempDir) -> anyhow::Result<()> {
    let mut repository = open_repository(repository_dir.path());
    repository.init()?;

    // no commits yet: every authorship question is answered no
    assert!(!repository.is_authored_recently(7)?);
    assert!(!repository.is_authored_by("Hao")?);

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "content".to_string(),
    ));
    repository.stage(&[PathBuf::from("a.txt")])?;
    repository.commit("hello", "Hao")?;

    assert!(repository.is_authored_recently(7)?);
    assert!(!repository.is_authored_recently(0)?);
    assert!(repository.is_authored_by("Hao")?);
    assert!(!repository.is_authored_by("Rufus")?);

    Ok(())
}

#[rstest]
fn history_stays_linear_and_terminates_at_the_root(
    repository_dir: TempDir,
) -> anyhow::Result<()> {
    let mut repository = open_repository(repository_dir.path());
    repository.init()?;

    let commit_count = 4;
    for round in 0..commit_count {
        write_file(FileSpec::new(
            repository_dir.path().join("a.txt"),
            format!("revision {round}"),
        ));
        repository.stage(&[PathBuf::from("a.txt")])?;
        repository.commit(&format!("commit {round}"), "ada")?;
    }

    let commits = repository
        .walk_history()?
        .collect::<anyhow::Result<Vec<_>>>()?;

    assert_eq!(commits.len(), commit_count);
    // newest first, root last, every link pointing one step back
    for pair in commits.windows(2) {
        assert_eq!(pair[0].1.parent(), Some(&pair[1].0));
    }
    assert_eq!(commits.last().unwrap().1.parent(), None);

    Ok(())
}

#[rstest]
fn status_reports_every_classification_at_once(repository_dir: TempDir) -> anyhow::Result<()> {
    let mut repository = open_repository(repository_dir.path());
    repository.init()?;

    write_file(FileSpec::new(
        repository_dir.path().join("committed.txt"),
        "settled".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("staged.txt"),
        "pending".to_string(),
    ));
    repository.stage(&[PathBuf::from("committed.txt")])?;
    repository.commit("baseline", "ada")?;

    repository.stage(&[PathBuf::from("committed.txt"), PathBuf::from("staged.txt")])?;
    std::fs::remove_file(repository_dir.path().join("staged.txt"))?;
    write_file(FileSpec::new(
        repository_dir.path().join("loose.txt"),
        "nobody staged me".to_string(),
    ));

    let report = repository.status()?;

    // staged.txt is new against the head AND deleted since staging
    assert!(report.staged.contains(Path::new("staged.txt")));
    assert!(report.modified.contains(Path::new("staged.txt")));
    // committed.txt matches the head and the working tree
    assert!(!report.staged.contains(Path::new("committed.txt")));
    assert!(!report.modified.contains(Path::new("committed.txt")));
    // loose.txt is only in the working tree
    assert_eq!(report.untracked.len(), 1);
    assert!(report.untracked.contains(Path::new("loose.txt")));

    Ok(())
}

#[rstest]
fn a_no_op_commit_surfaces_as_a_typed_error(repository_dir: TempDir) -> anyhow::Result<()> {
    let mut repository = open_repository(repository_dir.path());
    repository.init()?;

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "content".to_string(),
    ));
    repository.stage(&[PathBuf::from("a.txt")])?;
    repository.commit("first", "ada")?;

    let err = repository.commit("again", "ada").unwrap_err();
    assert_eq!(
        err.downcast_ref::<RepoError>(),
        Some(&RepoError::NothingToCommit)
    );

    Ok(())
}
