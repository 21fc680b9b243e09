//! Format string compilation
//!
//! A format string is a sequence of single-character field codes, e.g.
//! `"tsp"` for modification time, size and path. Order decides the column
//! order of every output line and codes may repeat.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

pub const DEFAULT_FORMAT: &str = "p";

/// A single output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCode {
    Path,
    ModTime,
    Size,
    Hash,
}

impl FieldCode {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'p' => Some(FieldCode::Path),
            't' => Some(FieldCode::ModTime),
            's' => Some(FieldCode::Size),
            'h' => Some(FieldCode::Hash),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            FieldCode::Path => 'p',
            FieldCode::ModTime => 't',
            FieldCode::Size => 's',
            FieldCode::Hash => 'h',
        }
    }
}

/// Compiled, non-empty list of field codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    fields: Vec<FieldCode>,
}

impl FormatSpec {
    /// Compile a format string, failing on the first unknown character.
    pub fn compile(format: &str) -> Result<Self, FormatError> {
        let mut fields = Vec::with_capacity(format.len());
        for c in format.chars() {
            let code = FieldCode::from_char(c).ok_or(FormatError::UnknownCharacter(c))?;
            fields.push(code);
        }
        if fields.is_empty() {
            return Err(FormatError::Empty);
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldCode] {
        &self.fields
    }

    pub fn has_hash(&self) -> bool {
        self.fields.contains(&FieldCode::Hash)
    }
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fields: vec![FieldCode::Path],
        }
    }
}

impl FromStr for FormatSpec {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for code in &self.fields {
            write!(f, "{}", code.as_char())?;
        }
        Ok(())
    }
}
