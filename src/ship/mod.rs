//! Release pipeline: automate the full release flow.
//!
//! Orchestrates manifest loading, version calculation, history extraction,
//! changelog generation, manifest update and git commit/tag/push.

pub mod executor;
pub mod manifest;

use std::path::PathBuf;

use tracing::info;

use crate::changelog::writer::generate_summary;
use crate::changelog::{CHANGELOG_FILE, extract_releases, render_changelog, write_changelog};
use crate::error::ReleaseError;
use crate::git::{GitExecutor, read_history};
use crate::version::{BumpDirective, calculate_next_version};

use self::manifest::load_manifest;

/// Configuration for a release run, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Project root holding the manifest, the changelog and the repository.
    pub root: PathBuf,
    pub directive: BumpDirective,
    pub push: bool,
    /// Update the changelog and manifest only; no commit or tag.
    pub upgrade_only: bool,
}

/// What a release run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The newest release in history is not the computed one: no commits to release.
    NothingToRelease {
        version: String,
        newest_tag: Option<String>,
    },
    Released {
        version: String,
        committed: bool,
        pushed: bool,
    },
}

/// Run the full release pipeline.
///
/// Nothing is written until the history shows commits for the new version.
/// Then the changelog is written before the manifest, and the manifest before
/// any git mutation.
pub fn run_release(
    options: &ReleaseOptions,
    git: &impl GitExecutor,
) -> Result<ReleaseOutcome, ReleaseError> {
    // ── Stage 1: Manifest and version ──
    let manifest = load_manifest(&options.root)?;
    let version = calculate_next_version(manifest.version.as_deref(), &options.directive);
    let tag = format!("v{}", version);

    println!(
        "Version: {} -> {}",
        manifest.version.as_deref().unwrap_or("none"),
        version
    );

    // ── Stage 2: History ──
    println!("Extract all releases");
    let history = read_history(git)?;
    let releases = extract_releases(&history, &tag);
    info!(releases = releases.len(), "Extracted releases from history");

    let newest_tag = releases.first().map(|r| r.tag.clone());
    if newest_tag.as_deref() != Some(tag.as_str()) {
        info!(
            expected = %tag,
            newest = newest_tag.as_deref().unwrap_or("(none)"),
            "Newest release does not match next version"
        );
        return Ok(ReleaseOutcome::NothingToRelease {
            version,
            newest_tag,
        });
    }

    // ── Stage 3: Changelog ──
    let rendered = render_changelog(&releases, &manifest.settings);
    let changelog_path = options.root.join(CHANGELOG_FILE);
    write_changelog(&changelog_path, &rendered)?;
    println!("  [DONE] Updated {}", CHANGELOG_FILE);
    println!("         {}", generate_summary(&releases, &rendered));

    // ── Stage 4: Manifest ──
    manifest.write_version(&version)?;
    println!("  [DONE] Updated {}", manifest.kind);

    // ── Stage 5: Commit, tag, push ──
    let committed = !options.upgrade_only;
    if committed {
        executor::commit_and_tag(git, &version, &rendered.latest_notes)?;
        println!("  [DONE] Created commit and tag {}", tag);
    }

    if options.push {
        executor::push_with_tags(git)?;
        println!("  [DONE] Pushed commits and tags");
    }

    Ok(ReleaseOutcome::Released {
        version,
        committed,
        pushed: options.push,
    })
}
