//! The interface between a storage backend and the listing driver.

use crate::entry::Entry;
use crate::error::WalkError;

/// One unit of delivery from a traversal.
#[derive(Debug)]
pub enum Step {
    /// The contents of the directory at `path` (`""` is the root).
    Listed { path: String, entries: Vec<Entry> },
    /// The directory at `path` could not be listed.
    Failed { path: String, error: WalkError },
}

/// A namespace that can be walked one directory at a time.
///
/// Implementations decide the order of steps; consumers write output in
/// exactly the order steps are yielded.
pub trait Traversal {
    type Steps: Iterator<Item = Step>;

    /// Start walking at `root` (relative, `""` for the namespace root).
    ///
    /// `max_depth` of `Some(1)` lists `root` only, `None` is unlimited and
    /// `Some(0)` yields nothing. An `Err` means the walk could not start.
    fn walk(&self, root: &str, max_depth: Option<usize>) -> Result<Self::Steps, WalkError>;
}
