//! Error types for CSV ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading an import file.
///
/// Validation findings are not errors: they are collected in a
/// [`seller_model::ValidationResult`]. These cover I/O and decoding only.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Import file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file metadata or contents.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes are not valid text in the detected encoding.
    #[error("invalid {encoding} text: {reason}")]
    Decode {
        encoding: &'static str,
        reason: String,
    },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
