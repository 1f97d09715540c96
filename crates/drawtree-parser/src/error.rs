//! Diagnostic system for the drawtree parser.
//!
//! The parser never fails on malformed lines. It records what it skipped as
//! warning [`Diagnostic`]s instead, each with a code, labeled source spans
//! and optional help text.
//!
//! # Example
//!
//! ```
//! # use drawtree_parser::error::{Diagnostic, ErrorCode};
//! # use drawtree_parser::Span;
//!
//! let diag = Diagnostic::warning("label is never closed")
//!     .with_code(ErrorCode::W001)
//!     .with_label(Span::new(4..12), "opened here")
//!     .with_help("close the label with `]`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;
