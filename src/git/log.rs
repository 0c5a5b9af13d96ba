//! Reading the decorated commit history.

use crate::error::GitError;

use super::command::GitExecutor;

/// Arguments producing one `<date><decoration> <subject>` line per commit, newest first.
pub const LOG_ARGS: [&str; 5] = [
    "log",
    "--no-color",
    "--decorate=short",
    "--pretty=format:%cd%d %s",
    "--date=format:%Y-%m-%d",
];

/// Read the full decorated history of the current branch.
pub fn read_history(git: &impl GitExecutor) -> Result<String, GitError> {
    git.run("extract releases", &LOG_ARGS)
}
