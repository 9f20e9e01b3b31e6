//! Error types for PresetForge.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for PresetForge operations.
#[derive(Debug, Error)]
pub enum PresetError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A preset file parsed as JSON but does not have the expected shape
    #[error("Invalid preset document {path:?}: {reason}")]
    InvalidDocument {
        /// File the document came from
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Collection name that matches none of the known collections
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Move direction that is not top/up/down/bottom
    #[error("Unknown move direction: {0}")]
    UnknownDirection(String),
}

/// Result type alias for PresetForge operations.
pub type PresetResult<T> = Result<T, PresetError>;
