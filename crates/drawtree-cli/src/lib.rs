//! CLI logic for the drawtree converter.
//!
//! This module reads a flowchart file, converts it through the drawtree
//! pipeline and writes the draw.io document.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io::Write, path::Path};

use log::{info, warn};
use tempfile::NamedTempFile;

use drawtree::{Converter, Diagnostic, DrawtreeError};

use error_adapter::{render, warnings_to_reportables};

/// Run the drawtree CLI application
///
/// This function processes the input file through the drawtree pipeline
/// and writes the resulting document to the output file. Parser warnings
/// are logged and do not stop the conversion.
///
/// # Errors
///
/// Returns `DrawtreeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Input without any node
/// - Layout errors
///
/// On error the output file is left untouched.
pub fn run(args: &Args) -> Result<(), DrawtreeError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing flowchart"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Convert using the Converter API
    let converter = Converter::new(app_config);
    let conversion = converter.convert(&source)?;
    report_warnings(conversion.warnings(), &source);

    // Write output file
    write_atomically(Path::new(&args.output), conversion.document())?;

    info!(
        output_file = args.output,
        nodes_count = conversion.graph().nodes_count(),
        edges_count = conversion.graph().edges().len();
        "draw.io document exported successfully"
    );

    Ok(())
}

fn report_warnings(warnings: &[Diagnostic], source: &str) {
    for reportable in warnings_to_reportables(warnings, source) {
        warn!("{}", render(&reportable));
    }
}

/// Write `contents` to a temporary file next to `path`, then move it over
/// `path`. A reader never observes a partially written document.
fn write_atomically(path: &Path, contents: &str) -> Result<(), DrawtreeError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.persist(path).map_err(|err| err.error)?;

    Ok(())
}
