use thiserror::Error;

use seller_model::ImportError;

/// Errors raised while transforming records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A required field was absent or empty.
    #[error("Required field '{field}' is missing")]
    MissingRequired { field: String },

    /// A record in a batch failed; `index` is 1-based.
    #[error("Error transforming record {index}: {source}")]
    Record {
        index: usize,
        source: Box<TransformError>,
    },
}

impl From<TransformError> for ImportError {
    fn from(err: TransformError) -> Self {
        ImportError::Transformation {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
