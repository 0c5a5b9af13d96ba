//! Git operations for the release pipeline: stage, commit, tag and push.
//!
//! Steps run strictly in order and the first failure aborts the rest. Errors
//! name the failing step so the user knows how far the release got.

use tracing::info;

use crate::error::GitError;
use crate::git::GitExecutor;

/// Release commit subject for a version.
pub fn release_subject(version: &str) -> String {
    format!("chore(release): v{}", version)
}

/// Full release commit message: subject, blank line, newest-release notes.
pub fn release_message(version: &str, notes: &str) -> String {
    format!("{}\n\n{}", release_subject(version), notes)
}

/// Stage everything, create the release commit and a lightweight tag.
///
/// Steps:
/// 1. `git add .`
/// 2. `git commit -m "chore(release): vX.Y.Z\n\n<notes>"`
/// 3. `git tag vX.Y.Z`
pub fn commit_and_tag(git: &impl GitExecutor, version: &str, notes: &str) -> Result<(), GitError> {
    println!("  (Git) Add files");
    git.run("stage files", &["add", "."])?;

    println!("  (Git) Commit release");
    let message = release_message(version, notes);
    git.run("create commit", &["commit", "-m", &message])?;

    println!("  (Git) Add tag");
    let tag = format!("v{}", version);
    git.run("create tag", &["tag", &tag])?;

    info!(%tag, "Created release commit and tag");
    Ok(())
}

/// Push commits, then tags, to the configured remote.
pub fn push_with_tags(git: &impl GitExecutor) -> Result<(), GitError> {
    println!("  (Git) Push commits");
    git.run("push commits", &["push"])?;

    println!("  (Git) Push tags");
    git.run("push tags", &["push", "--tags"])?;

    Ok(())
}
