//! Document exporters.
//!
//! An [`Exporter`] turns a positioned [`Layout`] into a finished document.
//! It is the last stage of a conversion.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse
//! Graph
//!     ↓ link orphans, assign levels
//! Leveled Graph
//!     ↓ layout
//! Layout (positioned nodes and edges)
//!     ↓ export (this module)
//! Document
//! ```
//!
//! # Available Backends
//!
//! - [`drawio`] - draw.io `mxGraphModel` XML via [`drawio::Drawio`]
//!
//! [`Error`] converts into [`DrawtreeError::Export`] at the crate boundary.
//!
//! [`DrawtreeError::Export`]: crate::DrawtreeError::Export

pub mod drawio;

use std::{io, string::FromUtf8Error};

use thiserror::Error;

use drawtree_core::positioned::Layout;

/// Abstraction for document export backends.
pub trait Exporter {
    /// Serialize the whole layout into a document.
    fn export(&self, layout: &Layout) -> Result<String, Error>;
}

/// Errors that can occur while writing a document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}
