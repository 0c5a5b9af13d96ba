//! Grouping decorated history lines into releases.
//!
//! History arrives newest first. Each `tag: v<semver>` decoration opens a
//! release; every typed commit below it (older, up to the next tag) is filed
//! under that release. Typed commits above the newest tag belong to the release
//! being prepared, which gets the fallback tag.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex_lite::Regex;
use tracing::debug;

use crate::git::normalize_line;

/// `<date> (<decoration>) <subject>` with the decoration group optional.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<date>\d{4}-\d{2}-\d{2})(?: \((?P<decoration>[^)]*)\))?(?: (?P<subject>.*))?$")
        .expect("Invalid line regex")
});

/// `<type>(<scope>): <message>` with the scope optional.
static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[^(:]+)(?:\((?P<scope>[^)]*)\))?:\s*(?P<message>.+)$")
        .expect("Invalid subject regex")
});

/// First `tag: v<semver>` token of a decoration group.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"tag:\s*(?P<tag>v\d+\.\d+\.\d+[0-9A-Za-z.+-]*)").expect("Invalid tag regex")
});

/// A tagged group of commits with typed changelog messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag: String,
    pub date: NaiveDate,
    /// Messages by commit type, in the order they were read (newest first).
    /// Keys only exist once they hold at least one message.
    pub changelogs: BTreeMap<String, Vec<String>>,
}

impl Release {
    pub fn new(tag: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            tag: tag.into(),
            date,
            changelogs: BTreeMap::new(),
        }
    }

    /// Messages recorded for a commit type, duplicates included.
    pub fn messages(&self, commit_type: &str) -> &[String] {
        self.changelogs
            .get(commit_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn push_message(&mut self, commit_type: &str, message: &str) {
        self.changelogs
            .entry(commit_type.to_string())
            .or_default()
            .push(message.to_string());
    }
}

/// One parsed history line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitLine {
    pub date: NaiveDate,
    pub tag: Option<String>,
    pub commit_type: String,
    pub message: String,
}

/// Parse a normalized history line.
///
/// Returns `None` for lines without a `type(scope): message` subject, tagged or
/// not; those are noise such as merge commits.
pub fn parse_line(line: &str) -> Option<CommitLine> {
    let caps = LINE_RE.captures(line)?;

    let date = caps.name("date")?.as_str();
    let date = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            debug!(date, error = %e, "Skipping line with invalid date");
            return None;
        }
    };

    let subject = SUBJECT_RE.captures(caps.name("subject")?.as_str())?;
    let commit_type = subject.name("type")?.as_str().trim();
    if commit_type.is_empty() {
        return None;
    }
    let message = subject.name("message")?.as_str();

    let tag = caps
        .name("decoration")
        .and_then(|d| TAG_RE.captures(d.as_str()))
        .and_then(|c| c.name("tag"))
        .map(|m| m.as_str().to_string());

    Some(CommitLine {
        date,
        tag,
        commit_type: commit_type.to_string(),
        message: message.to_string(),
    })
}

/// Stateful fold of history lines into releases.
#[derive(Debug)]
pub struct ReleaseExtractor {
    fallback_tag: String,
    releases: Vec<Release>,
}

impl ReleaseExtractor {
    /// `fallback_tag` names the release for commits newer than every tag.
    pub fn new(fallback_tag: impl Into<String>) -> Self {
        Self {
            fallback_tag: fallback_tag.into(),
            releases: Vec::new(),
        }
    }

    /// Feed one raw history line. Lines must arrive newest first.
    pub fn push_line(&mut self, raw: &str) {
        let normalized = normalize_line(raw);
        let Some(line) = parse_line(&normalized) else {
            if !normalized.is_empty() {
                debug!(line = %normalized, "Skipping non-conventional line");
            }
            return;
        };

        if let Some(tag) = line.tag {
            debug!(%tag, date = %line.date, "Found release tag");
            self.releases.push(Release::new(tag, line.date));
            return;
        }

        if self.releases.is_empty() {
            self.releases
                .push(Release::new(self.fallback_tag.clone(), line.date));
        }

        if let Some(current) = self.releases.last_mut() {
            current.push_message(&line.commit_type, &line.message);
        }
    }

    /// Releases seen so far, newest first.
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn finish(self) -> Vec<Release> {
        self.releases
    }
}

/// Group a whole history blob into releases, newest first.
pub fn extract_releases(log: &str, fallback_tag: &str) -> Vec<Release> {
    let mut extractor = ReleaseExtractor::new(fallback_tag);
    for line in log.lines() {
        extractor.push_line(line);
    }
    extractor.finish()
}
