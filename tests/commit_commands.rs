use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{init_repository_dir, keep_commit, run_keep_command};
use common::file::{FileSpec, write_file, write_generated_files};

#[rstest]
fn committing_staged_files_advances_the_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    write_generated_files(dir.path(), 2);

    run_keep_command(dir.path(), &["stage", "."])
        .assert()
        .success();

    keep_commit(dir.path(), "Initial commit")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[\(root-commit\) [0-9a-f]{7}\] Initial commit\n$",
        )?);

    let tip = std::fs::read_to_string(
        dir.path()
            .join(".keep")
            .join("refs")
            .join("heads")
            .join("master"),
    )?;
    assert_eq!(tip.trim().len(), 40);
    assert!(tip.trim().chars().all(|c| c.is_ascii_hexdigit()));

    Ok(())
}

#[rstest]
fn a_second_commit_chains_to_its_parent(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "one".to_string()));
    run_keep_command(dir.path(), &["stage", "a.txt"])
        .assert()
        .success();
    keep_commit(dir.path(), "first").assert().success();

    write_file(FileSpec::new(dir.path().join("a.txt"), "two".to_string()));
    run_keep_command(dir.path(), &["stage", "a.txt"])
        .assert()
        .success();

    // no (root-commit) marker the second time around
    keep_commit(dir.path(), "second")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[[0-9a-f]{7}\] second\n$")?);

    Ok(())
}

#[rstest]
fn repeating_a_commit_without_changes_is_rejected(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    write_generated_files(dir.path(), 1);

    run_keep_command(dir.path(), &["stage", "."])
        .assert()
        .success();
    keep_commit(dir.path(), "only commit").assert().success();

    keep_commit(dir.path(), "same state again")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));

    Ok(())
}

#[rstest]
fn committing_with_an_empty_stage_is_rejected(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    keep_commit(dir.path(), "nothing staged")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));

    Ok(())
}

#[rstest]
fn identical_file_contents_are_stored_once(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    // two files, same bytes: one blob object
    write_file(FileSpec::new(dir.path().join("a.txt"), "same".to_string()));
    write_file(FileSpec::new(dir.path().join("b.txt"), "same".to_string()));

    run_keep_command(dir.path(), &["stage", "."])
        .assert()
        .success();
    keep_commit(dir.path(), "dedup").assert().success();

    // one blob + one tree + one commit
    let objects_dir = dir.path().join(".keep").join("objects");
    let object_count: usize = std::fs::read_dir(&objects_dir)?
        .map(|bucket| std::fs::read_dir(bucket.unwrap().path()).unwrap().count())
        .sum();
    assert_eq!(object_count, 3);

    Ok(())
}
