use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_keep_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_keep_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("keep").expect("Failed to find keep binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn keep_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_keep_command(dir, &["commit", "-m", message]);
    cmd.env("KEEP_AUTHOR", "fake_user");
    cmd
}
