//! Shared utility functions for walking

use std::time::SystemTime;

use glob::Pattern;

use super::config::WalkerConfig;

/// Compile the exclude globs of a config.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>, glob::PatternError> {
    patterns.iter().map(|p| Pattern::new(p)).collect()
}

/// Check if a name should be skipped based on exclude patterns.
pub fn is_excluded(name: &str, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|p| p.as_str() == name || p.matches(name))
}

/// Join a relative directory path and a child name with `/`.
pub fn join_rel(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Check if a file passes the age filters based on its modification time.
pub fn passes_time_filter(mtime: Option<SystemTime>, config: &WalkerConfig) -> bool {
    if config.newer_than.is_none() && config.older_than.is_none() {
        return true;
    }

    // If we can't get mtime, include the file
    let Some(mtime) = mtime else {
        return true;
    };

    if let Some(newer) = config.newer_than {
        if mtime < newer {
            return false;
        }
    }

    if let Some(older) = config.older_than {
        if mtime > older {
            return false;
        }
    }

    true
}
