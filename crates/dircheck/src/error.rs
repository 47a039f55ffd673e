//! Error types for the dircheck library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dircheck operations.
#[derive(Debug, Error)]
pub enum DirCheckError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The directory violates its own contract (unknown or duplicate identifiers).
    #[error("Registry error: {0}")]
    Registry(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure saving or loading a report.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for dircheck operations.
pub type Result<T> = std::result::Result<T, DirCheckError>;
