// src/error.rs
//! Defines the error types for archive conversion.

use folio_archive::ArchiveError;
use folio_render_core::RenderError;
use folio_types::PageSizeError;
use thiserror::Error;

/// Failure inside a single content decoder. Never escapes the entry it belongs to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Parse(String),
    #[error("decoder panicked: {0}")]
    Panicked(String),
}

/// The main error enum for archive-level operations.
///
/// Any of these aborts the conversion of one archive; other archives in a
/// batch are unaffected.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to load archive: {0}")]
    ArchiveLoad(#[from] ArchiveError),
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Other pipeline error: {0}")]
    Other(String),
}

impl From<PageSizeError> for PipelineError {
    fn from(e: PageSizeError) -> Self {
        PipelineError::Config(e.to_string())
    }
}
