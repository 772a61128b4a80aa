use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keepsake::areas::repository::Repository;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "keep",
    version = "0.1.0",
    about = "A minimal content-addressed version control tool",
    long_about = "keep tracks snapshots of a working directory as content-addressed \
    objects, keeps a staging log of what the next commit should contain, and chains \
    commits into linear branch histories. It is a learning-scale tool, not a git \
    replacement.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "Initializes a repository in the current directory or at the specified path. \
        Rerunning against an existing repository loads it instead of overwriting anything."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "branch",
        about = "Create a branch, or show the active one",
        long_about = "With a name, creates a branch pointing at the current head and leaves the \
        active branch unchanged. Without a name, prints the active branch."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch the active branch",
        long_about = "Points HEAD at the named branch. Metadata only: working tree files are \
        left exactly as they are."
    )]
    Checkout {
        #[arg(index = 1, help = "The name of the branch to switch to")]
        name: String,
    },
    #[command(
        name = "stage",
        about = "Stage files for the next commit",
        long_about = "Snapshots the given files (directories expand recursively) into the \
        staging log. The most recent stage call is authoritative."
    )]
    Stage {
        #[arg(index = 1, required = true, help = "The paths to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Record the staged snapshot as a new commit",
        long_about = "Freezes the staged snapshot into a commit on the active branch. \
        Committing an unchanged snapshot is rejected as a no-op."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(short, long, help = "The author name (falls back to KEEP_AUTHOR)")]
        author: Option<String>,
    },
    #[command(name = "log", about = "Show the commit history of the active branch")]
    Log,
    #[command(name = "status", about = "Show staged, modified and untracked files")]
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => open_repository()?,
            };

            repository.init()?
        }
        Commands::Branch { name } => {
            let mut repository = open_initialized_repository()?;

            match name {
                Some(name) => repository.branch(name)?,
                None => repository.show_active_branch()?,
            }
        }
        Commands::Checkout { name } => {
            let mut repository = open_initialized_repository()?;

            repository.checkout(name)?
        }
        Commands::Stage { paths } => {
            let mut repository = open_initialized_repository()?;

            repository.stage(paths)?;
        }
        Commands::Commit { message, author } => {
            let mut repository = open_initialized_repository()?;
            let author = resolve_author(author.as_deref())?;

            repository.commit(message, &author)?;
        }
        Commands::Log => {
            let repository = open_initialized_repository()?;

            repository.log()?
        }
        Commands::Status => {
            let repository = open_initialized_repository()?;

            repository.print_status()?
        }
    }

    Ok(())
}

fn resolve_author(flag: Option<&str>) -> Result<String> {
    match flag {
        Some(author) => Ok(author.to_string()),
        None => std::env::var("KEEP_AUTHOR")
            .context("author not set: pass --author or set KEEP_AUTHOR"),
    }
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}

fn open_initialized_repository() -> Result<Repository> {
    let repository = open_repository()?;
    anyhow::ensure!(
        repository.is_initialized(),
        "not a keepsake repository (run 'keep init' first)"
    );

    Ok(repository)
}
