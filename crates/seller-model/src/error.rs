//! Error types for the seller data model.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building model values from external input.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to read a configuration file.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML or has unknown keys.
    #[error("failed to parse config {origin}: {source}")]
    ConfigParse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// Time frame name is not one of the known presets.
    #[error("unknown time frame '{0}'")]
    UnknownTimeFrame(String),

    /// Custom time frame with start after end.
    #[error("start date {start} is after end date {end}")]
    InvertedTimeFrame {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// Import kind name not recognized.
    #[error("unknown import kind '{0}'")]
    UnknownImportKind(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
