//! Codes for the drawtree diagnostic system.
//!
//! All parser diagnostics are recoverable, so every code is a warning code:
//! - `W00x` - Lexer and parser recoveries

use std::fmt;

/// Codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unterminated label.
    ///
    /// A `[` or `(` was opened but the line ended before the matching
    /// closing delimiter. The text after the delimiter is not a label.
    W001,

    /// Segment without identifier.
    ///
    /// One side of an arrow does not start with a node identifier, so no
    /// edge is created for that pair.
    W002,

    /// Line without graph elements.
    ///
    /// The line contains neither a node declaration nor an edge.
    W003,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "W001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::W001 => "W001",
            ErrorCode::W002 => "W002",
            ErrorCode::W003 => "W003",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
