//! Project manifest detection, release settings and version write-back.
//!
//! Supports package.json and Cargo.toml. Release settings live under
//! `"package-release"` in package.json and `[package.metadata.package-release]`
//! in Cargo.toml:
//!
//! ```json
//! "package-release": { "header": "# Changes", "types": { "feat": "Added", "chore": false } }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::changelog::{ChangelogSettings, TypeLabels};
use crate::error::ManifestError;

/// Key holding release settings inside the manifest.
pub const SETTINGS_KEY: &str = "package-release";

/// The kind of manifest detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    PackageJson,
    CargoToml,
}

impl ManifestKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestKind::PackageJson => "package.json",
            ManifestKind::CargoToml => "Cargo.toml",
        }
    }
}

impl std::fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// A loaded manifest with its current version and release settings.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: PathBuf,
    pub kind: ManifestKind,
    /// Stored version; `None` when absent or not a string.
    pub version: Option<String>,
    pub settings: ChangelogSettings,
}

/// Find and load the manifest in `root`.
///
/// package.json wins over Cargo.toml. A Cargo.toml without a `[package]`
/// table (a virtual workspace) does not count.
pub fn load_manifest(root: &Path) -> Result<Manifest, ManifestError> {
    let package_path = root.join(ManifestKind::PackageJson.file_name());
    if package_path.is_file() {
        return load_package_json(&package_path);
    }

    let cargo_path = root.join(ManifestKind::CargoToml.file_name());
    if cargo_path.is_file() {
        if let Some(manifest) = load_cargo_toml(&cargo_path)? {
            return Ok(manifest);
        }
        debug!(path = %cargo_path.display(), "Cargo.toml has no [package] table");
    }

    Err(ManifestError::NotFound {
        root: root.to_path_buf(),
    })
}

impl Manifest {
    /// Write `version` back, leaving every other field as it was.
    pub fn write_version(&self, version: &str) -> Result<(), ManifestError> {
        match self.kind {
            ManifestKind::PackageJson => update_package_json(&self.path, version),
            ManifestKind::CargoToml => update_cargo_toml(&self.path, version),
        }
    }
}

// --- package.json ---

fn load_package_json(path: &Path) -> Result<Manifest, ManifestError> {
    let json = parse_json(path, &read_file(path)?)?;

    let version = json
        .get("version")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let mut settings = ChangelogSettings::default();
    if let Some(config) = json.get(SETTINGS_KEY) {
        if let Some(header) = config.get("header").and_then(|h| h.as_str()) {
            settings.header = header.to_string();
        }
        if let Some(types) = config.get("types").and_then(|t| t.as_object()) {
            settings.types = types
                .iter()
                .map(|(t, label)| (t.clone(), label.as_str().map(str::to_string)))
                .collect();
        }
    }

    Ok(Manifest {
        path: path.to_path_buf(),
        kind: ManifestKind::PackageJson,
        version,
        settings,
    })
}

fn update_package_json(path: &Path, version: &str) -> Result<(), ManifestError> {
    let mut json = parse_json(path, &read_file(path)?)?;

    let Some(object) = json.as_object_mut() else {
        return Err(ManifestError::InvalidJson {
            path: path.to_path_buf(),
            reason: "top level is not an object".into(),
        });
    };
    object.insert(
        "version".to_string(),
        serde_json::Value::String(version.to_string()),
    );

    let output =
        serde_json::to_string_pretty(&json).map_err(|e| ManifestError::InvalidJson {
            path: path.to_path_buf(),
            reason: format!("Failed to serialize JSON: {}", e),
        })?;

    // npm uses trailing newline
    write_file(path, &format!("{}\n", output))
}

fn parse_json(path: &Path, content: &str) -> Result<serde_json::Value, ManifestError> {
    serde_json::from_str(content).map_err(|e| ManifestError::InvalidJson {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

// --- Cargo.toml ---

fn load_cargo_toml(path: &Path) -> Result<Option<Manifest>, ManifestError> {
    let doc = parse_toml(path, &read_file(path)?)?;

    let Some(package) = doc.get("package").and_then(|p| p.as_table_like()) else {
        return Ok(None);
    };

    let version = package
        .get("version")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let mut settings = ChangelogSettings::default();
    let config = package
        .get("metadata")
        .and_then(|m| m.get(SETTINGS_KEY))
        .and_then(|c| c.as_table_like());
    if let Some(config) = config {
        if let Some(header) = config.get("header").and_then(|h| h.as_str()) {
            settings.header = header.to_string();
        }
        if let Some(types) = config.get("types").and_then(|t| t.as_table_like()) {
            settings.types = types
                .iter()
                .map(|(t, label)| (t.to_string(), label.as_str().map(str::to_string)))
                .collect::<TypeLabels>();
        }
    }

    Ok(Some(Manifest {
        path: path.to_path_buf(),
        kind: ManifestKind::CargoToml,
        version,
        settings,
    }))
}

fn update_cargo_toml(path: &Path, version: &str) -> Result<(), ManifestError> {
    let mut doc = parse_toml(path, &read_file(path)?)?;

    if doc.get("package").and_then(|p| p.as_table_like()).is_none() {
        return Err(ManifestError::InvalidToml {
            path: path.to_path_buf(),
            reason: "No [package] table found".into(),
        });
    }
    doc["package"]["version"] = toml_edit::value(version);

    write_file(path, &doc.to_string())
}

fn parse_toml(path: &Path, content: &str) -> Result<toml_edit::DocumentMut, ManifestError> {
    content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| ManifestError::InvalidToml {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

// --- Shared helpers ---

fn read_file(path: &Path) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).map_err(|source| ManifestError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), ManifestError> {
    let write_failed = |source| ManifestError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(write_failed)?;
    file.write_all(content.as_bytes()).map_err(write_failed)?;
    file.persist(path).map_err(|e| write_failed(e.error))?;
    Ok(())
}
