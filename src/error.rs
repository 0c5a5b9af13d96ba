//! Error types for package-release modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from invoking the `git` binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git was not found on PATH. Install git and run package-release inside a repository.")]
    NotInstalled,

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },
}

impl GitError {
    /// Name of the step that failed, when one is known.
    pub fn operation(&self) -> Option<&str> {
        match self {
            GitError::NotInstalled => None,
            GitError::SpawnFailed { operation, .. } | GitError::CommandFailed { operation, .. } => {
                Some(operation.as_str())
            }
        }
    }
}

/// Errors from reading or updating the project manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("No package.json or Cargo.toml found or readable in folder: {}", .root.display())]
    NotFound { root: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {reason}", .path.display())]
    InvalidJson { path: PathBuf, reason: String },

    #[error("Invalid TOML in {}: {reason}", .path.display())]
    InvalidToml { path: PathBuf, reason: String },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from changelog operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to write changelog {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the release pipeline.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Changelog(#[from] ChangelogError),
}
