//! Seller CSV ingestion.
//!
//! Everything between a user picking a file and a list of rows the rest of
//! the pipeline can trust:
//!
//! - **File checks**: size, extension and file name, before any content is read
//! - **Decoding**: bytes to text with BOM detection
//! - **Content validation**: row/column limits, required columns, duplicate
//!   headers, malicious-pattern scan
//! - **Sanitization**: formula-injection neutralization per cell
//! - **Parsing**: naive comma splitting into header-keyed rows
//! - **Domain checks**: required columns per import kind
//!
//! # Example
//!
//! ```ignore
//! use seller_ingest::{RawFile, validate_file, safe_parse_bytes};
//! use seller_model::CsvConfig;
//!
//! let config = CsvConfig::default().with_required_columns(["date", "revenue"]);
//! let file = RawFile::read(Path::new("sales.csv"))?;
//! let file_check = validate_file(&file.info, &config);
//! if file_check.is_valid() {
//!     let parsed = safe_parse_bytes(&file.bytes, &config);
//!     println!("{} rows", parsed.data.len());
//! }
//! ```

mod cell;
mod content;
mod domain;
mod error;
mod file;
mod parse;
mod text;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Checks ===
pub use file::{FileInfo, MAX_FILE_NAME_LENGTH, RawFile, validate_file};

// === Decoding ===
pub use text::decode_text;

// === Content Validation ===
pub use content::{CONTENT_SCAN_LIMIT, is_security_finding, validate_content};

// === Sanitization ===
pub use cell::{is_formula_trigger, is_malicious, sanitize_cell, sanitize_csv_content, unquote_cell};

// === Parsing ===
pub use parse::{SafeParse, parse_csv, safe_parse_bytes, safe_parse_csv};

// === Domain Checks ===
pub use domain::{check_columns, missing_columns};
