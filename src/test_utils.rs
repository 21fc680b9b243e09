//! Test utilities: temporary directory trees and scripted traversals.
//!
//! This module is only compiled for tests and benchmarks.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::entry::Entry;
use crate::error::WalkError;
use crate::walk::{Step, Traversal};

/// A temporary directory tree for testing.
///
/// The tree is automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

enum Scripted {
    Listed(String, Vec<Entry>),
    Failed(String, String),
}

/// A traversal that replays a fixed sequence of steps, ignoring depth.
///
/// Records the depth it was last asked for.
#[derive(Default)]
pub struct StaticTraversal {
    script: Vec<Scripted>,
    unavailable: Option<String>,
    requested_depth: Cell<Option<Option<usize>>>,
}

impl StaticTraversal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A traversal whose walk cannot start.
    pub fn unavailable(message: &str) -> Self {
        Self {
            unavailable: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn listed(mut self, path: &str, entries: Vec<Entry>) -> Self {
        self.script.push(Scripted::Listed(path.to_string(), entries));
        self
    }

    pub fn failed(mut self, path: &str, message: &str) -> Self {
        self.script
            .push(Scripted::Failed(path.to_string(), message.to_string()));
        self
    }

    pub fn requested_depth(&self) -> Option<Option<usize>> {
        self.requested_depth.get()
    }
}

impl Traversal for StaticTraversal {
    type Steps = std::vec::IntoIter<Step>;

    fn walk(&self, _root: &str, max_depth: Option<usize>) -> Result<Self::Steps, WalkError> {
        self.requested_depth.set(Some(max_depth));
        if let Some(message) = &self.unavailable {
            return Err(WalkError::Other(message.clone()));
        }
        let steps: Vec<Step> = self
            .script
            .iter()
            .map(|s| match s {
                Scripted::Listed(path, entries) => Step::Listed {
                    path: path.clone(),
                    entries: entries.clone(),
                },
                Scripted::Failed(path, message) => Step::Failed {
                    path: path.clone(),
                    error: WalkError::Other(message.clone()),
                },
            })
            .collect();
        Ok(steps.into_iter())
    }
}
