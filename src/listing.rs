//! The listing driver
//!
//! Consumes the steps of a traversal, filters and renders each entry, and
//! writes one line per surviving entry. A directory that fails to list is
//! handed to an [`ErrorSink`] and the walk carries on; only a walk that
//! cannot start or an output that cannot be written ends the listing early.

use std::io::Write;

use crate::error::{ListError, WalkError};
use crate::output::{FormatSpec, RenderConfig, render};
use crate::walk::{FilterMode, Step, Traversal};

/// Everything that shapes one listing, built once per invocation.
#[derive(Debug, Clone, Default)]
pub struct ListConfig {
    pub format: FormatSpec,
    pub render: RenderConfig,
    pub filter: FilterMode,
    pub recursive: bool,
    /// Explicit depth limit. Takes precedence over `recursive`.
    pub max_depth: Option<usize>,
}

impl ListConfig {
    /// Depth to request from the traversal. `None` is unlimited.
    pub fn depth(&self) -> Option<usize> {
        match self.max_depth {
            Some(depth) => Some(depth),
            None if self.recursive => None,
            None => Some(1),
        }
    }
}

/// Receives directories that could not be listed.
pub trait ErrorSink {
    fn record(&mut self, path: &str, error: &WalkError);
}

/// Logs each listing error and keeps a count.
#[derive(Debug, Default)]
pub struct ErrorCounter {
    count: usize,
}

impl ErrorCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl ErrorSink for ErrorCounter {
    fn record(&mut self, path: &str, error: &WalkError) {
        self.count += 1;
        let path = if path.is_empty() { "." } else { path };
        log::error!("{}: error listing: {}", path, error);
    }
}

/// Collects `"path: error"` strings.
impl ErrorSink for Vec<String> {
    fn record(&mut self, path: &str, error: &WalkError) {
        self.push(format!("{}: {}", path, error));
    }
}

/// Counts from a finished listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSummary {
    /// Lines written to the output
    pub lines: usize,
    pub files: usize,
    pub dirs: usize,
    /// Steps handed to the error sink
    pub errors: usize,
}

/// List `source` from its root, writing one line per kept entry to `out`.
pub fn list<T, W, S>(
    source: &T,
    config: &ListConfig,
    out: &mut W,
    errors: &mut S,
) -> Result<ListSummary, ListError>
where
    T: Traversal,
    W: Write,
    S: ErrorSink + ?Sized,
{
    let steps = source.walk("", config.depth())?;
    let mut summary = ListSummary::default();

    for step in steps {
        let entries = match step {
            Step::Listed { entries, .. } => entries,
            Step::Failed { path, error } => {
                summary.errors += 1;
                errors.record(&path, &error);
                continue;
            }
        };

        for entry in &entries {
            if !config.filter.keep(entry) {
                continue;
            }
            let line = render(entry, &config.format, &config.render);
            writeln!(out, "{}", line).map_err(ListError::Output)?;

            summary.lines += 1;
            if entry.is_dir() {
                summary.dirs += 1;
            } else {
                summary.files += 1;
            }
        }
    }

    out.flush().map_err(ListError::Output)?;
    log::debug!(
        "listed {} files and {} directories with {} errors",
        summary.files,
        summary.dirs,
        summary.errors
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use super::*;
    use crate::entry::{DirEntry, Entry, FileEntry, HashKind};
    use crate::hash::MemoryHashes;
    use crate::output::{HASH_ERROR, HASH_UNSUPPORTED};
    use crate::test_utils::StaticTraversal;

    fn file(path: &str, size: u64) -> Entry {
        Entry::File(FileEntry::new(path, size, None, Arc::new(MemoryHashes::new())))
    }

    fn dir(path: &str) -> Entry {
        Entry::Directory(DirEntry::new(path, None))
    }

    fn run(source: &StaticTraversal, config: &ListConfig) -> (String, Vec<String>, ListSummary) {
        let mut out = Vec::new();
        let mut errors = Vec::new();
        let summary = list(source, config, &mut out, &mut errors).unwrap();
        (String::from_utf8(out).unwrap(), errors, summary)
    }

    fn config(format: &str) -> ListConfig {
        ListConfig {
            format: FormatSpec::compile(format).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_depth_policy() {
        let mut c = ListConfig::default();
        assert_eq!(c.depth(), Some(1));
        c.recursive = true;
        assert_eq!(c.depth(), None);
        c.max_depth = Some(3);
        assert_eq!(c.depth(), Some(3));
        c.recursive = false;
        assert_eq!(c.depth(), Some(3));
    }

    #[test]
    fn test_lines_follow_step_order() {
        let source = StaticTraversal::new()
            .listed("", vec![file("a", 1), dir("b")])
            .listed("b", vec![file("b/c", 2)]);

        let (out, errors, summary) = run(&source, &config("sp"));
        assert_eq!(out, "1;a\n0;b/\n2;b/c\n");
        assert!(errors.is_empty());
        assert_eq!(
            summary,
            ListSummary {
                lines: 3,
                files: 2,
                dirs: 1,
                errors: 0
            }
        );
    }

    #[test]
    fn test_failed_step_does_not_stop_listing() {
        let source = StaticTraversal::new()
            .listed("", vec![dir("bad"), dir("good")])
            .failed("bad", "permission denied")
            .listed("good", vec![file("good/x", 5)]);

        let (out, errors, summary) = run(&source, &config("p"));
        assert_eq!(out, "bad/\ngood/\ngood/x\n");
        assert_eq!(errors, vec!["bad: permission denied".to_string()]);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn test_files_only_and_dirs_only() {
        let source = StaticTraversal::new().listed("", vec![file("a", 1), dir("b"), file("c", 3)]);

        let mut c = config("p");
        c.filter = FilterMode::FilesOnly;
        let (out, _, _) = run(&source, &c);
        assert_eq!(out, "a\nc\n");

        c.filter = FilterMode::DirsOnly;
        let (out, _, _) = run(&source, &c);
        assert_eq!(out, "b/\n");
    }

    #[test]
    fn test_unsupported_hash_with_files_only() {
        let source = StaticTraversal::new().listed(
            "",
            vec![
                dir("d"),
                Entry::File(FileEntry::new(
                    "a",
                    1,
                    None,
                    Arc::new(MemoryHashes::new().with(HashKind::Sha1, "ignored")),
                )),
            ],
        );
        let mut c = config("hp");
        c.render.separator = "  ".to_string();
        c.filter = FilterMode::FilesOnly;

        let (out, _, _) = run(&source, &c);
        assert_eq!(out, format!("{}  a\n", HASH_UNSUPPORTED));
    }

    #[test]
    fn test_hash_failure_does_not_abort_entry_or_listing() {
        let source = StaticTraversal::new().listed(
            "",
            vec![
                Entry::File(FileEntry::new(
                    "broken",
                    1,
                    None,
                    Arc::new(MemoryHashes::new().with_failure(HashKind::Md5, "read error")),
                )),
                Entry::File(FileEntry::new(
                    "fine",
                    1,
                    None,
                    Arc::new(MemoryHashes::new().with(HashKind::Md5, "abc123")),
                )),
            ],
        );
        let (out, errors, _) = run(&source, &config("ph"));
        assert_eq!(out, format!("broken;{}\nfine;abc123\n", HASH_ERROR));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_walk_that_cannot_start_is_fatal() {
        let source = StaticTraversal::unavailable("no such bucket");
        let mut out = Vec::new();
        let mut errors = ErrorCounter::new();
        let result = list(&source, &config("p"), &mut out, &mut errors);
        assert!(matches!(result, Err(ListError::Walk(_))));
        assert!(out.is_empty());
        assert_eq!(errors.count(), 0);
    }

    #[test]
    fn test_depth_is_passed_to_traversal() {
        let source = StaticTraversal::new().listed("", vec![file("a", 1)]);
        let mut c = config("p");
        c.recursive = true;
        run(&source, &c);
        assert_eq!(source.requested_depth(), Some(None));

        c.recursive = false;
        run(&source, &c);
        assert_eq!(source.requested_depth(), Some(Some(1)));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unwritable_output_is_fatal() {
        let source = StaticTraversal::new()
            .listed("", vec![file("a", 1)])
            .failed("x", "later error");
        let mut errors = Vec::new();
        let result = list(&source, &config("p"), &mut BrokenPipe, &mut errors);
        assert!(matches!(result, Err(ListError::Output(_))));
        // Aborted before reaching the failed step
        assert!(errors.is_empty());
    }

    #[test]
    fn test_error_counter_counts() {
        let mut counter = ErrorCounter::new();
        counter.record("a", &WalkError::Other("x".into()));
        counter.record("", &WalkError::Other("y".into()));
        assert_eq!(counter.count(), 2);
    }
}
