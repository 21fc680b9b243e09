//! LocalFs - walks a directory tree on the local filesystem
//!
//! Directories are read one depth level at a time. All directories of a
//! level are read in parallel, then their steps are yielded in the order
//! their parents listed them, so output stays deterministic.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob::Pattern;
use rayon::prelude::*;

use crate::entry::{DirEntry, Entry, FileEntry};
use crate::error::WalkError;
use crate::hash::LocalHasher;

use super::config::WalkerConfig;
use super::traversal::{Step, Traversal};
use super::utils::{compile_patterns, is_excluded, join_rel, passes_time_filter};

/// A local directory tree, or a single local file.
pub struct LocalFs {
    lister: Arc<DirLister>,
    root_file: Option<Entry>,
    parallel_workers: usize,
}

impl LocalFs {
    /// Open `root`. Fails if it does not exist or a pattern is invalid.
    pub fn new(root: impl Into<PathBuf>, config: WalkerConfig) -> Result<Self, WalkError> {
        let root = root.into();
        let meta = match fs::metadata(&root) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(WalkError::DirNotFound(root));
            }
            Err(e) => return Err(WalkError::io(root, e)),
        };

        // A file root lists just that file, named relative to its parent
        let root_file = if meta.is_file() {
            let name = root
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Some(Entry::File(FileEntry::new(
                name,
                meta.len(),
                meta.modified().ok(),
                Arc::new(LocalHasher::new(&root)),
            )))
        } else {
            None
        };

        let patterns = compile_patterns(&config.exclude)?;
        Ok(Self {
            parallel_workers: config.parallel_workers,
            lister: Arc::new(DirLister {
                root,
                patterns,
                config,
            }),
            root_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.lister.root
    }

    fn workers(&self) -> Workers {
        match self.parallel_workers {
            0 => Workers::Global,
            1 => Workers::Sequential,
            n => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => Workers::Pool(pool),
                Err(e) => {
                    log::debug!("falling back to global thread pool: {}", e);
                    Workers::Global
                }
            },
        }
    }
}

impl Traversal for LocalFs {
    type Steps = LocalSteps;

    fn walk(&self, root: &str, max_depth: Option<usize>) -> Result<LocalSteps, WalkError> {
        let mut steps = LocalSteps {
            lister: Arc::clone(&self.lister),
            workers: Workers::Sequential,
            max_depth,
            pending: VecDeque::new(),
            frontier: Vec::new(),
        };
        if max_depth == Some(0) {
            return Ok(steps);
        }

        if let Some(file) = &self.root_file {
            steps.pending.push_back(Step::Listed {
                path: String::new(),
                entries: vec![file.clone()],
            });
            return Ok(steps);
        }

        // Reading the starting directory happens up front: if it fails the
        // walk has not started.
        let entries = self.lister.list(root)?;
        steps.workers = self.workers();
        steps.push_listed(root.to_string(), 1, entries);
        Ok(steps)
    }
}

enum Workers {
    Global,
    Sequential,
    Pool(rayon::ThreadPool),
}

/// Reads and converts a single directory. Shared with worker threads.
struct DirLister {
    root: PathBuf,
    patterns: Vec<Pattern>,
    config: WalkerConfig,
}

impl DirLister {
    fn abs(&self, rel: &str) -> PathBuf {
        if rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }

    /// List one directory, sorted by name.
    fn list(&self, rel: &str) -> Result<Vec<Entry>, WalkError> {
        let dir = self.abs(rel);
        let read = fs::read_dir(&dir).map_err(|e| WalkError::io(&dir, e))?;

        let mut items = Vec::new();
        for item in read {
            match item {
                Ok(item) => items.push(item),
                Err(e) => log::warn!("{}: failed to read directory entry: {}", dir.display(), e),
            }
        }
        items.sort_by_key(|item| item.file_name());

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let name = item.file_name().to_string_lossy().into_owned();
            if is_excluded(&name, &self.patterns) {
                continue;
            }
            let path = join_rel(rel, &name);

            // Does not follow symlinks
            let meta = match item.metadata() {
                Ok(m) => m,
                Err(e) => {
                    log::warn!("{}: failed to read metadata: {}", path, e);
                    continue;
                }
            };
            let file_type = meta.file_type();
            let mod_time = meta.modified().ok();

            if file_type.is_symlink() {
                log::debug!("{}: skipping symlink", path);
            } else if file_type.is_dir() {
                entries.push(Entry::Directory(DirEntry::new(path, mod_time)));
            } else if file_type.is_file() {
                if !passes_time_filter(mod_time, &self.config) {
                    continue;
                }
                entries.push(Entry::File(FileEntry::new(
                    path,
                    meta.len(),
                    mod_time,
                    Arc::new(LocalHasher::new(item.path())),
                )));
            } else {
                log::debug!("{}: skipping special file", path);
            }
        }

        Ok(entries)
    }
}

/// Iterator over the steps of a local walk.
pub struct LocalSteps {
    lister: Arc<DirLister>,
    workers: Workers,
    max_depth: Option<usize>,
    pending: VecDeque<Step>,
    /// Directories to read next, with the depth of their listing
    frontier: Vec<(String, usize)>,
}

impl LocalSteps {
    fn push_listed(&mut self, path: String, depth: usize, entries: Vec<Entry>) {
        let descend = self.max_depth.is_none_or(|max| depth < max);
        if descend {
            for entry in &entries {
                if let Entry::Directory(d) = entry {
                    self.frontier.push((d.path.clone(), depth + 1));
                }
            }
        }
        self.pending.push_back(Step::Listed { path, entries });
    }

    fn read_level(&mut self) {
        let level = std::mem::take(&mut self.frontier);
        let lister = &self.lister;
        let read = |(path, depth): (String, usize)| {
            let result = lister.list(&path);
            (path, depth, result)
        };

        let results: Vec<(String, usize, Result<Vec<Entry>, WalkError>)> = match &self.workers {
            Workers::Sequential => level.into_iter().map(read).collect(),
            Workers::Global => level.into_par_iter().map(read).collect(),
            Workers::Pool(pool) => pool.install(|| level.into_par_iter().map(read).collect()),
        };

        for (path, depth, result) in results {
            match result {
                Ok(entries) => self.push_listed(path, depth, entries),
                Err(error) => self.pending.push_back(Step::Failed { path, error }),
            }
        }
    }
}

impl Iterator for LocalSteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(step) = self.pending.pop_front() {
                return Some(step);
            }
            if self.frontier.is_empty() {
                return None;
            }
            self.read_level();
        }
    }
}
