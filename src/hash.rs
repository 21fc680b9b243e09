//! Lazily computed file hashes
//!
//! A `FileEntry` holds a `HashProvider` instead of precomputed values, so a
//! hash is only calculated when the `h` field is actually rendered.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::entry::HashKind;
use crate::error::HashError;

const BUFFER_SIZE: usize = 64 * 1024;

/// Dropbox hashes content in blocks of this size.
const DROPBOX_BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Source of hash values for a single file.
pub trait HashProvider: fmt::Debug + Send + Sync {
    /// Return the lowercase hex hash of the given kind.
    ///
    /// `Ok("")` means the backend has no value but nothing went wrong.
    fn hash(&self, kind: HashKind) -> Result<String, HashError>;
}

/// Hashes a file on the local filesystem by reading it.
#[derive(Debug, Clone)]
pub struct LocalHasher {
    path: PathBuf,
}

impl LocalHasher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn supports(kind: HashKind) -> bool {
        !matches!(kind, HashKind::QuickXor)
    }
}

impl HashProvider for LocalHasher {
    fn hash(&self, kind: HashKind) -> Result<String, HashError> {
        if !Self::supports(kind) {
            return Err(HashError::Unsupported(kind));
        }
        let file = File::open(&self.path)?;
        let hex = match kind {
            HashKind::Md5 => digest_reader::<Md5, _>(file)?,
            HashKind::Sha1 => digest_reader::<Sha1, _>(file)?,
            HashKind::Dropbox => dropbox_hash_reader(file)?,
            HashKind::QuickXor => return Err(HashError::Unsupported(kind)),
        };
        Ok(hex)
    }
}

/// Fixed hash outcomes, for backends that receive hashes from a remote
/// listing rather than computing them.
///
/// Kinds with no recorded outcome report `Unsupported`.
#[derive(Debug, Clone, Default)]
pub struct MemoryHashes {
    values: BTreeMap<HashKind, Result<String, String>>,
}

impl MemoryHashes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: HashKind, value: impl Into<String>) -> Self {
        self.values.insert(kind, Ok(value.into()));
        self
    }

    pub fn with_failure(mut self, kind: HashKind, message: impl Into<String>) -> Self {
        self.values.insert(kind, Err(message.into()));
        self
    }
}

impl HashProvider for MemoryHashes {
    fn hash(&self, kind: HashKind) -> Result<String, HashError> {
        match self.values.get(&kind) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(HashError::Failed(message.clone())),
            None => Err(HashError::Unsupported(kind)),
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Read into `buf`, retrying on `Interrupted`. Returns 0 at end of input.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

fn digest_reader<D: Digest, R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUFFER_SIZE];
    loop {
        let n = read_chunk(&mut reader, &mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(to_hex(&hasher.finalize()))
}

fn dropbox_hash_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut overall = Sha256::new();
    let mut block = Sha256::new();
    let mut in_block = 0usize;
    let mut buf = vec![0u8; BUFFER_SIZE];

    loop {
        let n = read_chunk(&mut reader, &mut buf)?;
        if n == 0 {
            break;
        }
        let mut chunk = &buf[..n];
        while !chunk.is_empty() {
            let take = (DROPBOX_BLOCK_SIZE - in_block).min(chunk.len());
            block.update(&chunk[..take]);
            in_block += take;
            chunk = &chunk[take..];
            if in_block == DROPBOX_BLOCK_SIZE {
                overall.update(block.finalize_reset());
                in_block = 0;
            }
        }
    }
    if in_block > 0 {
        overall.update(block.finalize());
    }

    Ok(to_hex(&overall.finalize()))
}
