//! Render releases to Markdown and write the changelog file.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ChangelogError;

use super::extract::Release;
use super::format::ChangelogSettings;

/// A rendered changelog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChangelog {
    /// Full Markdown document, ending with a newline.
    pub document: String,
    /// Bullet lines of the newest release, joined with `\n`.
    /// Used as the body of the release commit.
    pub latest_notes: String,
}

/// Render all releases, newest first.
///
/// Each release gets a `## <tag> (<date>)` heading followed by one block per
/// visible type, in the order the settings declare them. Messages repeated
/// within a release and type are listed once.
pub fn render_changelog(releases: &[Release], settings: &ChangelogSettings) -> RenderedChangelog {
    let mut lines = vec![settings.header.clone(), String::new()];
    let mut latest = Vec::new();

    for (index, release) in releases.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!(
            "## {} ({})",
            release.tag,
            release.date.format("%Y-%m-%d")
        ));

        for (commit_type, label) in settings.types.visible() {
            let messages = release.messages(commit_type);
            if messages.is_empty() {
                continue;
            }

            lines.push(String::new());
            for message in dedup(messages) {
                let bullet = format!("- {}: {}", label, message);
                if index == 0 {
                    latest.push(bullet.clone());
                }
                lines.push(bullet);
            }
        }
    }

    let mut document = lines.join("\n");
    document.push('\n');

    RenderedChangelog {
        document,
        latest_notes: latest.join("\n"),
    }
}

/// Distinct messages in first-occurrence order.
fn dedup(messages: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::with_capacity(messages.len());
    for message in messages {
        if !seen.contains(&message.as_str()) {
            seen.push(message);
        }
    }
    seen
}

/// Overwrite `path` with the rendered document.
///
/// The content goes to a temporary file in the same directory first, which is
/// then renamed over the target.
pub fn write_changelog(path: &Path, rendered: &RenderedChangelog) -> Result<(), ChangelogError> {
    let write_failed = |source| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(write_failed)?;
    file.write_all(rendered.document.as_bytes())
        .map_err(write_failed)?;
    file.persist(path).map_err(|e| write_failed(e.error))?;

    Ok(())
}

/// Short summary for the user.
pub fn generate_summary(releases: &[Release], rendered: &RenderedChangelog) -> String {
    let entries = rendered
        .latest_notes
        .lines()
        .filter(|l| !l.is_empty())
        .count();
    let entry_word = if entries == 1 { "entry" } else { "entries" };
    let release_word = if releases.len() == 1 {
        "release"
    } else {
        "releases"
    };

    format!(
        "{} {} in the newest section, {} {} in total",
        entries,
        entry_word,
        releases.len(),
        release_word
    )
}
