//! Git repository fixture.

use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Email configured in fixture repositories.
pub const TEST_USER_EMAIL: &str = "test@test.com";

/// User name configured in fixture repositories.
pub const TEST_USER_NAME: &str = "Test";

/// Options for [`init_git_repo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GitInitOptions {
    /// Stage everything and create an (allowed-empty) initial commit.
    pub initial_commit: bool,
}

impl GitInitOptions {
    /// Create default options (no initial commit).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an initial commit after initialization.
    #[must_use]
    pub fn initial_commit(mut self) -> Self {
        self.initial_commit = true;
        self
    }
}

/// Initialize a git repository in `dir` with a fixed test identity.
///
/// Each step runs to completion before the next; the first failure is
/// returned as-is and nothing is retried or rolled back.
///
/// # Errors
///
/// Returns [`Error::Io`] if `git` cannot be spawned and [`Error::Git`] if a
/// step exits unsuccessfully.
pub async fn init_git_repo(dir: impl AsRef<Path>, options: GitInitOptions) -> Result<()> {
    let dir = dir.as_ref();

    run_git(dir, &["init"]).await?;
    run_git(dir, &["config", "user.email", TEST_USER_EMAIL]).await?;
    run_git(dir, &["config", "user.name", TEST_USER_NAME]).await?;

    if options.initial_commit {
        run_git(dir, &["add", "-A"]).await?;
        run_git(dir, &["commit", "-m", "initial", "--allow-empty"]).await?;
    }

    Ok(())
}

async fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
    debug!(dir = %dir.display(), ?args, "running git");
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .await?;

    if output.status.success() {
        Ok(())
    } else {
        Err(Error::Git {
            program: "git".to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
