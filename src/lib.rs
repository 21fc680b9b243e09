//! lsf - list directories and files in a form that is easy to parse from scripts

pub mod entry;
pub mod error;
pub mod hash;
pub mod listing;
pub mod output;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use entry::{DirEntry, Entry, FileEntry, HashKind};
pub use error::{FormatError, HashError, ListError, WalkError};
pub use hash::{HashProvider, LocalHasher, MemoryHashes};
pub use listing::{ErrorCounter, ErrorSink, ListConfig, ListSummary, list};
pub use output::{FieldCode, FormatSpec, RenderConfig, render};
pub use walk::{FilterMode, LocalFs, Step, Traversal, WalkerConfig};
