//! Next-version calculation from a bump directive.

use std::str::FromStr;

use tracing::warn;

/// Version assumed when the manifest has none.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Which part of the version to bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpType {
    Major,
    Minor,
    Patch,
    /// A pre-release channel such as `alpha`, `beta` or `rc`.
    Prerelease(String),
}

impl FromStr for BumpType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            "" => Err("bump type must not be empty".to_string()),
            other => Ok(Self::Prerelease(other.to_string())),
        }
    }
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BumpType::Major => write!(f, "major"),
            BumpType::Minor => write!(f, "minor"),
            BumpType::Patch => write!(f, "patch"),
            BumpType::Prerelease(id) => write!(f, "{}", id),
        }
    }
}

/// How the user asked for the next version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpDirective {
    /// Use this exact version string.
    Explicit(String),
    Bump(BumpType),
}

impl BumpDirective {
    /// An explicit, non-empty version always wins over the bump type.
    pub fn from_args(version: Option<String>, bump: BumpType) -> Self {
        match version.filter(|v| !v.is_empty()) {
            Some(v) => Self::Explicit(v),
            None => Self::Bump(bump),
        }
    }
}

/// Calculate the next version string.
///
/// Increments the requested position of `current` in place. Lower positions are
/// kept as they are, so `1.2.3` bumped by `major` becomes `2.2.3`.
///
/// A pre-release bump only rewrites the third position: its leading integer is
/// kept and `-<id>.<n>` is appended, where `n` continues the counter already
/// present for the same identifier or starts at 1.
///
/// Malformed numeric parts count as 0 and numbers of any length are kept;
/// this never fails.
pub fn calculate_next_version(current: Option<&str>, directive: &BumpDirective) -> String {
    let bump = match directive {
        BumpDirective::Explicit(version) => return version.clone(),
        BumpDirective::Bump(bump) => bump,
    };

    let current = current.filter(|v| !v.is_empty()).unwrap_or(DEFAULT_VERSION);
    let mut parts: Vec<String> = current.split('.').map(str::to_string).collect();
    while parts.len() < 3 {
        parts.push("0".to_string());
    }

    match bump {
        BumpType::Major => increment(&mut parts[0]),
        BumpType::Minor => increment(&mut parts[1]),
        BumpType::Patch => increment(&mut parts[2]),
        BumpType::Prerelease(id) => {
            let tail = parts[2..].join(".");
            let counter = tail.split(id.as_str()).nth(1).map_or("", trailing_digits);
            parts[2] = format!(
                "{}-{}.{}",
                canonical(leading_digits(&tail)),
                id,
                plus_one(counter)
            );
        }
    }

    let next = parts[..3].join(".");
    if semver::Version::parse(&next).is_err() {
        warn!(current = %current, next = %next, "Next version is not valid SemVer");
    }
    next
}

fn increment(part: &mut String) {
    *part = plus_one(leading_digits(part));
}

/// Leading run of ASCII digits.
fn leading_digits(s: &str) -> &str {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    &s[..end]
}

/// Trailing run of ASCII digits.
fn trailing_digits(s: &str) -> &str {
    let start = s.rfind(|c: char| !c.is_ascii_digit()).map_or(0, |i| i + 1);
    &s[start..]
}

/// Digits without leading zeros; an empty run reads as `0`.
fn canonical(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Decimal increment on the digit string, so components of any length are kept.
fn plus_one(digits: &str) -> String {
    let mut bytes = canonical(digits).into_bytes();
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    let mut carried = String::with_capacity(bytes.len() + 1);
    carried.push('1');
    carried.push_str(&String::from_utf8_lossy(&bytes));
    carried
}
