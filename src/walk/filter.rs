//! Entry type filtering

use crate::entry::Entry;

/// Which kinds of entries make it into the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    FilesOnly,
    DirsOnly,
}

impl FilterMode {
    /// Build from the two command line switches. Both set is rejected.
    pub fn from_flags(files_only: bool, dirs_only: bool) -> Option<Self> {
        match (files_only, dirs_only) {
            (false, false) => Some(FilterMode::All),
            (true, false) => Some(FilterMode::FilesOnly),
            (false, true) => Some(FilterMode::DirsOnly),
            (true, true) => None,
        }
    }

    pub fn keep(&self, entry: &Entry) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::FilesOnly => matches!(entry, Entry::File(_)),
            FilterMode::DirsOnly => matches!(entry, Entry::Directory(_)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::entry::{DirEntry, FileEntry};
    use crate::hash::MemoryHashes;

    fn entries() -> (Entry, Entry) {
        (
            Entry::File(FileEntry::new("f", 0, None, Arc::new(MemoryHashes::new()))),
            Entry::Directory(DirEntry::new("d", None)),
        )
    }

    #[test]
    fn test_keep() {
        let (file, dir) = entries();
        assert!(FilterMode::All.keep(&file));
        assert!(FilterMode::All.keep(&dir));
        assert!(FilterMode::FilesOnly.keep(&file));
        assert!(!FilterMode::FilesOnly.keep(&dir));
        assert!(!FilterMode::DirsOnly.keep(&file));
        assert!(FilterMode::DirsOnly.keep(&dir));
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(FilterMode::from_flags(false, false), Some(FilterMode::All));
        assert_eq!(FilterMode::from_flags(true, false), Some(FilterMode::FilesOnly));
        assert_eq!(FilterMode::from_flags(false, true), Some(FilterMode::DirsOnly));
        assert_eq!(FilterMode::from_flags(true, true), None);
    }
}
