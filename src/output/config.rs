//! Output configuration types

use crate::entry::HashKind;

pub const DEFAULT_SEPARATOR: &str = ";";

/// Configuration for rendering one listing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Placed between fields. Never escaped inside field values.
    pub separator: String,
    /// Append `/` to directory paths
    pub dir_slash: bool,
    /// Hash requested by the `h` field
    pub hash: HashKind,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            dir_slash: true,
            hash: HashKind::Md5,
        }
    }
}
