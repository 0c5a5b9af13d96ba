//! Release extraction and changelog rendering.

pub mod extract;
pub mod format;
pub mod writer;

pub use extract::{CommitLine, Release, ReleaseExtractor, extract_releases, parse_line};
pub use format::{CHANGELOG_FILE, CHANGELOG_HEADER, ChangelogSettings, TypeLabels};
pub use writer::{RenderedChangelog, render_changelog, write_changelog};
