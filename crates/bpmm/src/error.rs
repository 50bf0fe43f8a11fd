//! Error types for BPMM operations.
//!
//! This module provides the main error type [`BpmmError`]. Problems scoped to
//! a single element (a malformed fragment, a clamped resize, a cancelled
//! delete) are never reported through it; they degrade to skipping that one
//! element or operation.

use std::io;

use thiserror::Error;

/// The main error type for BPMM operations.
#[derive(Debug, Error)]
pub enum BpmmError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
