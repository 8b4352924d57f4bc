//! Seller import data model.
//!
//! Shared types for the CSV import pipeline:
//!
//! - **Validation results** produced by every file/content validation stage
//! - **CSV configuration** with defaults and TOML-loadable overrides
//! - **Rows and records**: raw string rows as parsed, typed records after
//!   schema transformation
//! - **Import vocabulary**: import kinds, time frames, and the error taxonomy

pub mod config;
pub mod error;
pub mod issue;
pub mod kind;
pub mod row;
pub mod timeframe;
pub mod validation;
pub mod value;

pub use config::{
    CsvConfig, CsvConfigOverrides, DEFAULT_MAX_COLUMNS, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_ROWS,
};
pub use error::{ModelError, Result};
pub use issue::{ErrorKind, ImportError, ReportCategory, Severity};
pub use kind::ImportKind;
pub use row::{CsvRow, ParsedDataset, Record};
pub use timeframe::TimeFrame;
pub use validation::ValidationResult;
pub use value::FieldValue;
