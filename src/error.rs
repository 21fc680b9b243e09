//! Error types for listing, walking and hashing

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::entry::HashKind;

/// A format string could not be compiled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("unknown format character {0:?}")]
    UnknownCharacter(char),

    #[error("format string is empty")]
    Empty,
}

/// An error raised by a traversal backend.
///
/// Returned from `Traversal::walk` it is fatal; carried inside a failed
/// step it only affects that one directory.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("directory not found: {}", .0.display())]
    DirNotFound(PathBuf),

    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("{0}")]
    Other(String),
}

impl WalkError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        WalkError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a hash value could not be produced for a file.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("hash type {0} not supported")]
    Unsupported(HashKind),

    #[error("failed to read file for hashing: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Failed(String),
}

/// A fatal listing failure. Per-directory errors never end up here.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("cannot start listing: {0}")]
    Walk(#[from] WalkError),

    #[error("error writing output: {0}")]
    Output(#[source] io::Error),
}
