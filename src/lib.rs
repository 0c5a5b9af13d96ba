//! package-release - turn conventional commits into a changelog, a version bump and a release tag.
//!
//! # Overview
//!
//! package-release reads the decorated `git log`, groups commits into releases by
//! their `vX.Y.Z` tags, renders `CHANGELOG.md`, writes the next version into the
//! project manifest and records the release as a commit plus a lightweight tag.

pub mod changelog;
pub mod error;
pub mod git;
pub mod ship;
pub mod version;

// Re-export commonly used types
pub use changelog::{ChangelogSettings, Release, RenderedChangelog, TypeLabels};
pub use error::{ChangelogError, GitError, ManifestError, ReleaseError};
pub use git::{GitExecutor, SystemGit};
pub use ship::{ReleaseOptions, ReleaseOutcome, run_release};
pub use version::{BumpDirective, BumpType};
