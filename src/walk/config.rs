//! Configuration types for the local walker

use std::time::SystemTime;

/// Configuration for local filesystem traversal.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Glob patterns matched against entry names. Matching directories are
    /// neither listed nor descended into.
    pub exclude: Vec<String>,
    /// Only include files modified after this time
    pub newer_than: Option<SystemTime>,
    /// Only include files modified before this time
    pub older_than: Option<SystemTime>,
    /// Number of parallel workers for reading directories.
    /// 0 = auto-detect (rayon global pool)
    /// 1 = sequential (no parallelism)
    /// N = use N worker threads
    pub parallel_workers: usize,
}
