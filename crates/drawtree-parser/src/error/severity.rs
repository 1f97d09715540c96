//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Every parser diagnostic is recoverable, so [`Severity::Warning`] is the
/// only level: it marks input that was skipped or only partly understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A non-fatal warning about input that was skipped.
    ///
    /// Conversion continues with whatever the parser could recover.
    Warning,
}

impl Severity {
    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
        }
    }
}
