//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use git2::{Oid, Repository, Signature, Time};

use package_release::{GitError, GitExecutor};

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Get the path to a decorated log fixture.
pub fn log_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("logs").join(name)
}

/// Get the path to a changelog fixture.
pub fn changelog_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("changelogs").join(name)
}

/// Read a fixture file as a string.
pub fn read_fixture(path: PathBuf) -> String {
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e))
}

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write a minimal package.json with the given version.
pub fn write_package_json(dir: &Path, version: &str) -> PathBuf {
    let path = dir.join("package.json");
    std::fs::write(
        &path,
        format!("{{\n  \"name\": \"demo\",\n  \"version\": \"{}\"\n}}\n", version),
    )
    .expect("Failed to write package.json");
    path
}

/// Fake git that serves a fixed history and records every call.
pub struct RecordingGit {
    history: String,
    fail_on: Option<String>,
    calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl RecordingGit {
    pub fn new(history: impl Into<String>) -> Self {
        Self {
            history: history.into(),
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Make the named operation fail with a `CommandFailed` error.
    pub fn failing_on(mut self, operation: &str) -> Self {
        self.fail_on = Some(operation.to_string());
        self
    }

    /// Operation names in call order.
    pub fn operations(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(op, _)| op.clone()).collect()
    }

    /// Arguments of the first call to `operation`.
    pub fn args_of(&self, operation: &str) -> Option<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .find(|(op, _)| op == operation)
            .map(|(_, args)| args.clone())
    }
}

impl GitExecutor for RecordingGit {
    fn run<'a>(&self, operation: &str, args: &[&'a str]) -> Result<String, GitError> {
        self.calls.borrow_mut().push((
            operation.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
        ));

        if self.fail_on.as_deref() == Some(operation) {
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                stderr: "simulated failure".to_string(),
            });
        }

        if args.first() == Some(&"log") {
            return Ok(self.history.clone());
        }
        Ok(String::new())
    }
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new git repository with a local identity and signing disabled,
    /// so the `git` binary can commit and tag inside it.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config.set_bool("commit.gpgsign", false).expect("Failed to set commit.gpgsign");
            config.set_bool("tag.gpgsign", false).expect("Failed to set tag.gpgsign");
        }
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a commit dated at noon UTC on `date` (YYYY-MM-DD). Returns the commit OID.
    pub fn commit_on(&self, date: &str, message: &str) -> Oid {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("Invalid fixture date");
        let seconds = day
            .and_hms_opt(12, 0, 0)
            .expect("Invalid time")
            .and_utc()
            .timestamp();
        let sig = Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))
            .expect("Failed to create signature");

        // Create or update a file to have something to commit
        let file_path = self.dir.path().join("test.txt");
        std::fs::write(&file_path, format!("{}\n{}", date, message))
            .expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(Path::new("test.txt"))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }

    /// Names of all tags in the repository.
    pub fn tag_names(&self) -> Vec<String> {
        self.repo
            .tag_names(None)
            .expect("Failed to list tags")
            .iter()
            .flatten()
            .map(str::to_string)
            .collect()
    }

    /// Full message of the HEAD commit.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.message().unwrap_or("").to_string())
            .expect("Failed to read HEAD commit")
    }
}
