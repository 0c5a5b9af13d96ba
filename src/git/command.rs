//! Execute-and-capture boundary around the system `git` binary.
//!
//! Shelling out inherits the user's git config, SSH agent and credential store.
//! Every call runs to completion and returns the full standard output.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Trait for running git commands.
///
/// This abstraction allows driving the release pipeline without a real repository.
#[cfg_attr(test, mockall::automock)]
pub trait GitExecutor {
    /// Run `git <args>` for the named `operation` and return its standard output.
    fn run<'a>(&self, operation: &str, args: &[&'a str]) -> Result<String, GitError>;
}

/// Executor that calls the real `git` binary inside `root`.
#[derive(Debug, Clone)]
pub struct SystemGit {
    root: PathBuf,
}

impl SystemGit {
    /// Create an executor rooted at `root`.
    ///
    /// Fails with `GitError::NotInstalled` when `git` is not on `PATH`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, GitError> {
        which::which("git").map_err(|_| GitError::NotInstalled)?;
        Ok(Self { root: root.into() })
    }
}

impl GitExecutor for SystemGit {
    fn run<'a>(&self, operation: &str, args: &[&'a str]) -> Result<String, GitError> {
        debug!(operation, ?args, root = %self.root.display(), "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: operation.to_string(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        // git reports progress (push, commit summaries) on stderr even on success
        if !stderr.trim().is_empty() {
            debug!(operation, stderr = %stderr.trim(), "git wrote to stderr");
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
