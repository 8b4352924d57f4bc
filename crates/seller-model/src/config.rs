//! CSV import limits.
//!
//! [`CsvConfig`] is the resolved configuration a validator runs with.
//! [`CsvConfigOverrides`] is the partial form read from a TOML file or built
//! by a caller; every field it leaves unset falls back to the default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Maximum file size in bytes (5 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Maximum number of non-blank lines, header included.
pub const DEFAULT_MAX_ROWS: usize = 10_000;

/// Maximum number of header fields.
pub const DEFAULT_MAX_COLUMNS: usize = 50;

/// Resolved CSV import limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvConfig {
    pub max_file_size: u64,
    pub max_rows: usize,
    pub max_columns: usize,
    /// Extensions including the leading dot, lowercase (e.g. `.csv`).
    pub allowed_extensions: Vec<String>,
    /// Column names that must be present (matched by substring).
    pub required_columns: Vec<String>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_rows: DEFAULT_MAX_ROWS,
            max_columns: DEFAULT_MAX_COLUMNS,
            allowed_extensions: vec![".csv".to_string(), ".txt".to_string()],
            required_columns: Vec::new(),
        }
    }
}

impl CsvConfig {
    /// Applies overrides on top of the defaults.
    pub fn from_overrides(overrides: &CsvConfigOverrides) -> Self {
        overrides.apply(Self::default())
    }

    /// Replaces the required column list.
    #[must_use]
    pub fn with_required_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if `extension` (with leading dot) is allowed, ignoring case.
    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

/// Partial configuration merged over [`CsvConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsvConfigOverrides {
    pub max_file_size: Option<u64>,
    pub max_rows: Option<usize>,
    pub max_columns: Option<usize>,
    pub allowed_extensions: Option<Vec<String>>,
    pub required_columns: Option<Vec<String>>,
}

impl CsvConfigOverrides {
    /// Parses overrides from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| ModelError::ConfigParse {
            origin: "<inline>".to_string(),
            source,
        })
    }

    /// Loads overrides from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ModelError::ConfigParse {
            origin: path.display().to_string(),
            source,
        })
    }

    /// Merges these overrides over `base`.
    pub fn apply(&self, base: CsvConfig) -> CsvConfig {
        CsvConfig {
            max_file_size: self.max_file_size.unwrap_or(base.max_file_size),
            max_rows: self.max_rows.unwrap_or(base.max_rows),
            max_columns: self.max_columns.unwrap_or(base.max_columns),
            allowed_extensions: self
                .allowed_extensions
                .as_ref()
                .map(|exts| exts.iter().map(|ext| normalize_extension(ext)).collect())
                .unwrap_or(base.allowed_extensions),
            required_columns: self
                .required_columns
                .clone()
                .unwrap_or(base.required_columns),
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    let lower = ext.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}
