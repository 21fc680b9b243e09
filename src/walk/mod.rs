//! Namespace traversal
//!
//! - `Traversal`: the interface the listing driver consumes, yielding `Step`s
//! - `LocalFs`: local filesystem backend, reads each depth level in parallel
//! - `FilterMode`: keeps files, directories or both

mod config;
mod filter;
mod traversal;
mod utils;
mod walker;

// Re-export public types
pub use config::WalkerConfig;
pub use filter::FilterMode;
pub use traversal::{Step, Traversal};
pub use walker::{LocalFs, LocalSteps};
