//! File-level checks run before any content is read.

use std::path::Path;

use tracing::debug;

use seller_model::{CsvConfig, ValidationResult};

use crate::error::{IngestError, Result};

/// Longest accepted file name, in UTF-16 code units.
pub const MAX_FILE_NAME_LENGTH: usize = 255;

/// Name and size of a candidate import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Reads the name and size from file metadata.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, metadata.len()))
    }

    /// Lowercased extension with its leading dot.
    ///
    /// A name without a dot is its own "extension", so `README` gives
    /// `.readme` and is rejected like any other unknown type.
    pub fn extension(&self) -> String {
        let tail = match self.name.rfind('.') {
            Some(pos) => &self.name[pos + 1..],
            None => self.name.as_str(),
        };
        format!(".{}", tail.to_lowercase())
    }
}

/// A file read fully into memory.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub info: FileInfo,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn read(path: &Path) -> Result<Self> {
        let info = FileInfo::from_path(path)?;
        let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
        debug!(file = %path.display(), bytes = bytes.len(), "read import file");
        Ok(Self { info, bytes })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let info = FileInfo::new(name, bytes.len() as u64);
        Self { info, bytes }
    }
}

/// Checks size, extension and name. Every check runs; warnings stay empty.
pub fn validate_file(file: &FileInfo, config: &CsvConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if file.size > config.max_file_size {
        errors.push(format!(
            "File size ({}MB) exceeds maximum allowed size ({}MB)",
            megabytes(file.size),
            megabytes(config.max_file_size)
        ));
    }

    let extension = file.extension();
    if !config.allows_extension(&extension) {
        errors.push(format!(
            "File type \"{extension}\" is not allowed. Allowed types: {}",
            config.allowed_extensions.join(", ")
        ));
    }

    if file.name.encode_utf16().count() > MAX_FILE_NAME_LENGTH {
        errors.push(format!(
            "File name is too long (maximum {MAX_FILE_NAME_LENGTH} characters)"
        ));
    }

    if file.name.chars().any(is_invalid_name_char) {
        errors.push("File name contains invalid characters".to_string());
    }

    debug!(
        file = %file.name,
        size = file.size,
        errors = errors.len(),
        "file validation complete"
    );
    ValidationResult::new(errors, Vec::new())
}

fn is_invalid_name_char(ch: char) -> bool {
    matches!(ch, '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\u{00}'..='\u{1f}')
}

fn megabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / 1024.0 / 1024.0)
}
