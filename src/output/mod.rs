//! Listing line formatting
//!
//! # Module Structure
//!
//! - `config` - Render configuration (separator, directory slash, hash kind)
//! - `format` - Format string compiler
//! - `fields` - Per-field extraction with sentinel values for hash failures
//! - `line` - Joins extracted fields into one output line

mod config;
mod fields;
mod format;
mod line;

pub use config::{DEFAULT_SEPARATOR, RenderConfig};
pub use fields::{HASH_ERROR, HASH_UNSUPPORTED, TIME_FORMAT, extract, format_time};
pub use format::{DEFAULT_FORMAT, FieldCode, FormatSpec};
pub use line::render;
