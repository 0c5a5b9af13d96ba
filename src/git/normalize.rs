//! Decorated log line normalization.
//!
//! `git log --decorate=short --pretty=format:'%cd%d %s'` emits lines such as
//!
//! ```text
//! 2024-03-01 (HEAD -> main, tag: v1.2.0, origin/main) feat(api): add endpoint
//! ```
//!
//! Only `tag: v<semver>` refs matter for release grouping. Everything else in the
//! decoration group (branch heads, remote-tracking refs, other tags) is removed
//! so that the extractor sees `<date> (tag: v1.2.0) <subject>` or `<date> <subject>`.

/// Prefix git uses for tag refs inside a decoration group.
const TAG_PREFIX: &str = "tag: ";

/// Normalize one raw decorated log line.
///
/// Ref stripping only touches the decoration group right after the date;
/// the subject keeps its slashes and commas. Runs of whitespace are collapsed to
/// a single space across the whole line. Lines that do not look like
/// `<date> ...` are returned whitespace-collapsed and otherwise untouched.
pub fn normalize_line(raw: &str) -> String {
    let line = collapse_whitespace(raw);

    let Some((date, rest)) = line.split_once(' ') else {
        return line;
    };

    let Some((decoration, subject)) = split_decoration(rest) else {
        return line;
    };

    let tags: Vec<&str> = decoration
        .split(',')
        .map(str::trim)
        .filter(|token| is_release_tag_ref(token))
        .collect();

    match (tags.is_empty(), subject.is_empty()) {
        (true, true) => date.to_string(),
        (true, false) => format!("{} {}", date, subject),
        (false, true) => format!("{} ({})", date, tags.join(", ")),
        (false, false) => format!("{} ({}) {}", date, tags.join(", "), subject),
    }
}

/// Split `"(refs) subject"` into the ref list and the subject.
///
/// Returns `None` when `rest` does not open with a parenthesized group.
fn split_decoration(rest: &str) -> Option<(&str, &str)> {
    let inner = rest.strip_prefix('(')?;
    let close = inner.find(')')?;
    let decoration = &inner[..close];
    let subject = inner[close + 1..].trim_start();
    Some((decoration, subject))
}

/// Whether a decoration token is a `tag: v<digits>...` release tag.
///
/// `HEAD -> main`, bare `HEAD`, `origin/main`, local branches and tags that do
/// not start with `v` followed by a digit all return `false`.
fn is_release_tag_ref(token: &str) -> bool {
    token
        .strip_prefix(TAG_PREFIX)
        .map(str::trim_start)
        .and_then(|name| name.strip_prefix('v'))
        .and_then(|version| version.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
