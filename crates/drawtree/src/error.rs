//! Error types for drawtree operations.
//!
//! This module provides the main error type [`DrawtreeError`] which wraps
//! the conditions that abort a conversion.

use std::io;

use thiserror::Error;

use drawtree_parser::error::Diagnostic;

/// The main error type for drawtree operations.
///
/// # Diagnostic Variants
///
/// The `EmptyGraph` variant keeps the warnings raised while parsing together
/// with the source text, so callers can show why nothing was recognized.
#[derive(Debug, Error)]
pub enum DrawtreeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no nodes found in the input, nothing to convert")]
    EmptyGraph {
        warnings: Vec<Diagnostic>,
        src: String,
    },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<crate::export::Error> for DrawtreeError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl DrawtreeError {
    /// Create a new `EmptyGraph` error with the associated source code.
    pub fn new_empty_graph(warnings: Vec<Diagnostic>, src: impl Into<String>) -> Self {
        Self::EmptyGraph {
            warnings,
            src: src.into(),
        }
    }
}
