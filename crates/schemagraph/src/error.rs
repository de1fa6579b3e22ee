//! Error types for SchemaGraph operations.
//!
//! Malformed schema sources are not errors: they degrade to a smaller graph
//! and scan diagnostics. [`SchemaGraphError`] covers the failures around
//! the pipeline instead.

use std::io;

use thiserror::Error;

/// The main error type for SchemaGraph operations.
#[derive(Debug, Error)]
pub enum SchemaGraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),

    /// The analysis pipeline stopped unexpectedly.
    #[error("Analysis failed: {0}")]
    Pipeline(String),
}
