//! CLI logic for the BPMM document inspector.
//!
//! The inspector loads a saved diagram document the same way the editor
//! does, reports which elements were restored and which were skipped, and
//! can write the normalized document back out.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info, warn};

use bpmm::{BpmmError, load_document, save_document};

/// Outcome of inspecting a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Elements restored from the document.
    pub loaded: usize,
    /// Entries that could not be restored.
    pub skipped: usize,
}

/// Run the BPMM CLI application
///
/// Loads the input document, logs every restored element and, when an
/// output path is given, writes the normalized document as pretty JSON.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `BpmmError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Input that is not valid JSON or not an element document
pub fn run(args: &Args) -> Result<Report, BpmmError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Inspecting document"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let document = load_document(&source, app_config.element())?;

    for element in document.elements() {
        let position = element.position();
        let size = element.size();
        debug!(
            id:% = element.id(),
            category:% = element.category(),
            x = position.x(),
            y = position.y(),
            width = size.width(),
            height = size.height();
            "Restored element"
        );
    }
    if document.skipped() > 0 {
        warn!(skipped = document.skipped(); "Some document entries were skipped");
    }

    if let Some(output) = &args.output {
        let normalized = serde_json::to_string_pretty(&save_document(document.elements()))?;
        fs::write(output, normalized)?;
        info!(output_file = output; "Normalized document written");
    }

    Ok(Report {
        loaded: document.elements().len(),
        skipped: document.skipped(),
    })
}
