//! Changelog settings: document header and commit type labels.

/// Default document header.
pub const CHANGELOG_HEADER: &str = "# CHANGELOG";

/// Default changelog file name, relative to the project root.
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Commit types shown by default, in display order.
const DEFAULT_TYPES: [(&str, &str); 5] = [
    ("feat", "Feat"),
    ("fix", "Fix"),
    ("docs", "Docs"),
    ("perf", "Perf"),
    ("refactor", "Refactor"),
];

/// Ordered mapping from commit type token to display label.
///
/// Declaration order is the order types appear under each release. A type with
/// no label is known but hidden, which lets a manifest silence noisy types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLabels {
    entries: Vec<(String, Option<String>)>,
}

impl TypeLabels {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a type. A later entry for the same type replaces the label in place.
    pub fn insert(&mut self, commit_type: impl Into<String>, label: Option<String>) {
        let commit_type = commit_type.into();
        match self.entries.iter_mut().find(|(t, _)| *t == commit_type) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((commit_type, label)),
        }
    }

    /// Shown types with their labels, in declaration order.
    pub fn visible(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(t, label)| label.as_deref().map(|l| (t.as_str(), l)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeLabels {
    fn default() -> Self {
        DEFAULT_TYPES
            .iter()
            .map(|(t, label)| (t.to_string(), Some(label.to_string())))
            .collect()
    }
}

impl FromIterator<(String, Option<String>)> for TypeLabels {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        let mut labels = TypeLabels::new();
        for (commit_type, label) in iter {
            labels.insert(commit_type, label);
        }
        labels
    }
}

/// How the changelog document is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogSettings {
    pub header: String,
    pub types: TypeLabels,
}

impl Default for ChangelogSettings {
    fn default() -> Self {
        Self {
            header: CHANGELOG_HEADER.to_string(),
            types: TypeLabels::default(),
        }
    }
}
