//! Directory entries yielded by a traversal

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::HashError;
use crate::hash::HashProvider;

/// Hash algorithms a backend may be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum HashKind {
    #[default]
    Md5,
    Sha1,
    /// Dropbox content hash: SHA-256 over the SHA-256 of each 4 MiB block.
    Dropbox,
    /// OneDrive QuickXorHash. Known, but not computed by the local backend.
    QuickXor,
}

impl HashKind {
    pub const ALL: [HashKind; 4] = [
        HashKind::Md5,
        HashKind::Sha1,
        HashKind::Dropbox,
        HashKind::QuickXor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HashKind::Md5 => "MD5",
            HashKind::Sha1 => "SHA-1",
            HashKind::Dropbox => "DropboxHash",
            HashKind::QuickXor => "QuickXorHash",
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashKind {
    type Err = String;

    /// Parse a hash name case-insensitively. Accepts the canonical names
    /// plus a few common spellings ("sha1", "dropbox", "quickxor").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(HashKind::Md5),
            "sha-1" | "sha1" => Ok(HashKind::Sha1),
            "dropboxhash" | "dropbox" => Ok(HashKind::Dropbox),
            "quickxorhash" | "quickxor" => Ok(HashKind::QuickXor),
            _ => {
                let names: Vec<&str> = HashKind::ALL.iter().map(|k| k.name()).collect();
                Err(format!(
                    "unknown hash type {:?} (expected one of {})",
                    s,
                    names.join("|")
                ))
            }
        }
    }
}

/// A file with a size and lazily computed hashes.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: String,
    pub size: u64,
    pub mod_time: Option<SystemTime>,
    hashes: Arc<dyn HashProvider>,
}

impl FileEntry {
    pub fn new(
        path: impl Into<String>,
        size: u64,
        mod_time: Option<SystemTime>,
        hashes: Arc<dyn HashProvider>,
    ) -> Self {
        Self {
            path: path.into(),
            size,
            mod_time,
            hashes,
        }
    }

    /// Ask the backend for a hash. Computed on each call.
    pub fn hash(&self, kind: HashKind) -> Result<String, HashError> {
        self.hashes.hash(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: String,
    pub mod_time: Option<SystemTime>,
}

impl DirEntry {
    pub fn new(path: impl Into<String>, mod_time: Option<SystemTime>) -> Self {
        Self {
            path: path.into(),
            mod_time,
        }
    }
}

/// One record from a namespace traversal.
#[derive(Debug, Clone)]
pub enum Entry {
    File(FileEntry),
    Directory(DirEntry),
}

impl Entry {
    /// Namespace-relative path, `/`-separated, without a trailing slash.
    pub fn path(&self) -> &str {
        match self {
            Entry::File(f) => &f.path,
            Entry::Directory(d) => &d.path,
        }
    }

    pub fn mod_time(&self) -> Option<SystemTime> {
        match self {
            Entry::File(f) => f.mod_time,
            Entry::Directory(d) => d.mod_time,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }
}
