//! Source location tracking for error reporting
//!
//! The compiler consumes a single source file, so a location is just a
//! 1-based line and column pair. Columns count characters within the
//! current line; tabs count as one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the source file (line and column are 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln: {}, Col: {}", self.line, self.column)
    }
}
