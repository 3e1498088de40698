//! Error types for persistence collaborators.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving project data.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// View id not present in the project
    #[error("Unknown view: {id}")]
    UnknownView {
        /// The missing view id
        id: String,
    },

    /// Project file written by an incompatible version
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Version this build reads
        expected: String,
        /// Version found in the file
        found: String,
    },

    /// Project file not found
    #[error("Project file not found: {path:?}")]
    NotFound {
        /// Path that was opened
        path: PathBuf,
    },

    /// The backend refused the write
    #[error("Save rejected: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Create an unknown view error.
    pub fn unknown_view(id: impl Into<String>) -> Self {
        Self::UnknownView { id: id.into() }
    }
}
