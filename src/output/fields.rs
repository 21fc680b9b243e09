//! Per-field text extraction
//!
//! Extraction never fails: anything that cannot be produced degrades to an
//! empty string or to one of the hash sentinels below.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};

use crate::entry::Entry;
use crate::error::HashError;

use super::config::RenderConfig;
use super::format::FieldCode;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rendered in place of a hash that could not be computed.
pub const HASH_ERROR: &str = "ERROR";

/// Rendered when the backend cannot provide the requested hash kind.
pub const HASH_UNSUPPORTED: &str = "UNSUPPORTED";

/// Produce the text for one field of one entry.
pub fn extract(code: FieldCode, entry: &Entry, config: &RenderConfig) -> String {
    match code {
        FieldCode::Path => path_field(entry, config.dir_slash),
        FieldCode::ModTime => entry.mod_time().map(format_time).unwrap_or_default(),
        FieldCode::Size => size_field(entry),
        FieldCode::Hash => hash_field(entry, config),
    }
}

fn path_field(entry: &Entry, dir_slash: bool) -> String {
    match entry {
        Entry::Directory(d) if dir_slash => format!("{}/", d.path),
        _ => entry.path().to_string(),
    }
}

/// Format a timestamp in local time with second precision.
///
/// Times chrono cannot represent render as an empty string.
pub fn format_time(time: SystemTime) -> String {
    to_local(time)
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn to_local(time: SystemTime) -> Option<DateTime<Local>> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => (i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
        Err(e) => {
            let before = e.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => (-secs, 0),
                n => (-secs - 1, 1_000_000_000 - n),
            }
        }
    };
    DateTime::from_timestamp(secs, nanos).map(|utc| utc.with_timezone(&Local))
}

fn size_field(entry: &Entry) -> String {
    match entry {
        Entry::File(f) => f.size.to_string(),
        Entry::Directory(_) => "0".to_string(),
    }
}

fn hash_field(entry: &Entry, config: &RenderConfig) -> String {
    let file = match entry {
        Entry::File(f) => f,
        Entry::Directory(_) => return String::new(),
    };
    match file.hash(config.hash) {
        Ok(hex) => hex,
        Err(HashError::Unsupported(_)) => HASH_UNSUPPORTED.to_string(),
        Err(e) => {
            log::debug!("{}: failed to read {} hash: {}", file.path, config.hash, e);
            HASH_ERROR.to_string()
        }
    }
}
