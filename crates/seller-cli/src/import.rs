//! Import controller: file selection, preview, time frame, hand-off.
//!
//! ```text
//! Idle --select--> Previewing --confirm--> Imported
//!   ^                  |
//!   +------cancel------+        any failed step --> Failed
//! ```
//!
//! File- and content-level failures fail closed: nothing parsed from a
//! rejected file is kept. Every failure goes to the injected reporter;
//! security findings are reported as critical.

use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{info, info_span, warn};

use seller_common::{ErrorReport, ReporterHandle};
use seller_ingest::{
    FileInfo, RawFile, check_columns, is_security_finding, safe_parse_bytes, validate_file,
};
use seller_model::{CsvConfig, CsvRow, ImportError, ImportKind, ParsedDataset, Record, TimeFrame};
use seller_validate::{schemas, validate_data};

/// Rows shown before the user confirms.
pub const PREVIEW_ROWS: usize = 5;

const COMPONENT: &str = "CsvImport";

/// A parsed file waiting for confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub file_name: String,
    pub dataset: ParsedDataset,
    /// Content validation warnings.
    pub warnings: Vec<String>,
}

impl Preview {
    /// The first [`PREVIEW_ROWS`] rows.
    pub fn rows(&self) -> &[CsvRow] {
        self.dataset.preview(PREVIEW_ROWS)
    }

    pub fn total_rows(&self) -> usize {
        self.dataset.len()
    }
}

/// Summary of a confirmed import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReceipt {
    pub file_name: String,
    pub rows: usize,
    pub skipped_lines: Vec<usize>,
    pub warnings: Vec<String>,
    pub time_frame: TimeFrame,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportState {
    Idle,
    Previewing(Preview),
    Imported(ImportReceipt),
    Failed(ImportError),
}

/// Drives one import at a time for a fixed [`ImportKind`].
#[derive(Debug)]
pub struct ImportController {
    kind: ImportKind,
    config: CsvConfig,
    reporter: ReporterHandle,
    state: ImportState,
}

impl ImportController {
    pub fn new(kind: ImportKind, config: CsvConfig, reporter: ReporterHandle) -> Self {
        Self {
            kind,
            config,
            reporter,
            state: ImportState::Idle,
        }
    }

    pub fn kind(&self) -> ImportKind {
        self.kind
    }

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    pub fn preview(&self) -> Option<&Preview> {
        match &self.state {
            ImportState::Previewing(preview) => Some(preview),
            _ => None,
        }
    }

    /// Picks the first file with an allowed extension, then validates,
    /// reads, parses and column-checks it.
    ///
    /// Returns the number of parsed rows; [`preview`](Self::preview) has the rest.
    pub fn select<P: AsRef<Path>>(&mut self, files: &[P]) -> Result<usize, ImportError> {
        let Some(path) = files
            .iter()
            .map(AsRef::as_ref)
            .find(|path| self.has_allowed_extension(path))
        else {
            return Err(self.fail(
                ImportError::File {
                    messages: vec!["Please select a CSV file".to_string()],
                },
                "selectFile",
            ));
        };
        let preview = self.load(path).map_err(|err| self.fail(err, "selectFile"))?;
        info!(
            file = %preview.file_name,
            rows = preview.total_rows(),
            skipped = preview.dataset.skipped_lines.len(),
            "file ready for import"
        );
        let rows = preview.total_rows();
        self.state = ImportState::Previewing(preview);
        Ok(rows)
    }

    /// Confirms the previewed file for `time_frame`, checked against today's date.
    pub fn confirm<F>(
        &mut self,
        time_frame: Option<TimeFrame>,
        on_import: F,
    ) -> Result<ImportReceipt, ImportError>
    where
        F: FnOnce(&[CsvRow], &TimeFrame),
    {
        self.confirm_at(time_frame, Local::now().date_naive(), on_import)
    }

    /// Like [`confirm`](Self::confirm) with an explicit `today`.
    ///
    /// `on_import` receives every parsed row, not only the preview. A time
    /// frame error keeps the preview so the user can pick again.
    pub fn confirm_at<F>(
        &mut self,
        time_frame: Option<TimeFrame>,
        today: NaiveDate,
        on_import: F,
    ) -> Result<ImportReceipt, ImportError>
    where
        F: FnOnce(&[CsvRow], &TimeFrame),
    {
        let ImportState::Previewing(preview) = &self.state else {
            return Err(ImportError::Validation {
                field: "file".to_string(),
                message: "No file is ready to import".to_string(),
            });
        };
        let time_frame = match check_time_frame(time_frame, today) {
            Ok(time_frame) => time_frame,
            Err(err) => {
                self.reporter.report(
                    ErrorReport::from_import_error(&err, COMPONENT).with_action("confirmImport"),
                );
                return Err(err);
            }
        };

        on_import(&preview.dataset.rows, &time_frame);
        let receipt = ImportReceipt {
            file_name: preview.file_name.clone(),
            rows: preview.dataset.len(),
            skipped_lines: preview.dataset.skipped_lines.clone(),
            warnings: preview.warnings.clone(),
            time_frame,
        };
        info!(
            file = %receipt.file_name,
            rows = receipt.rows,
            time_frame = receipt.time_frame.name(),
            "import confirmed"
        );
        self.state = ImportState::Imported(receipt.clone());
        Ok(receipt)
    }

    /// Drops any preview or result and returns to `Idle`.
    pub fn cancel(&mut self) {
        self.state = ImportState::Idle;
    }

    fn has_allowed_extension(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| FileInfo::new(name.to_string_lossy(), 0).extension())
            .is_some_and(|extension| self.config.allows_extension(&extension))
    }

    fn load(&self, path: &Path) -> Result<Preview, ImportError> {
        let _span = info_span!("import", file = %path.display(), kind = self.kind.label()).entered();

        let info = FileInfo::from_path(path).map_err(file_error)?;
        let file_check = validate_file(&info, &self.config);
        if !file_check.is_valid() {
            let (messages, _) = file_check.into_parts();
            return Err(ImportError::File { messages });
        }

        let raw = RawFile::read(path).map_err(file_error)?;
        let parsed = safe_parse_bytes(&raw.bytes, &self.config);
        let (errors, warnings) = parsed.validation.into_parts();
        if !errors.is_empty() {
            return Err(if errors.iter().any(|e| is_security_finding(e)) {
                ImportError::Security { messages: errors }
            } else {
                ImportError::Content { messages: errors }
            });
        }
        for warning in &warnings {
            warn!("{warning}");
        }

        check_columns(&parsed.data, self.kind).map_err(|missing| ImportError::Content {
            messages: vec![format!(
                "Invalid CSV format. Missing required columns: {}",
                missing.join(", ")
            )],
        })?;

        Ok(Preview {
            file_name: raw.info.name,
            dataset: parsed.data,
            warnings,
        })
    }

    fn fail(&mut self, err: ImportError, action: &str) -> ImportError {
        warn!(kind = ?err.kind(), "import failed: {err}");
        self.reporter
            .report(ErrorReport::from_import_error(&err, COMPONENT).with_action(action));
        self.state = ImportState::Failed(err.clone());
        err
    }
}

fn file_error(err: seller_ingest::IngestError) -> ImportError {
    ImportError::File {
        messages: vec![err.to_string()],
    }
}

/// Requires a time frame; a custom one must be ordered and not in the future.
fn check_time_frame(time_frame: Option<TimeFrame>, today: NaiveDate) -> Result<TimeFrame, ImportError> {
    let Some(time_frame) = time_frame else {
        return Err(ImportError::Validation {
            field: "timeFrame".to_string(),
            message: "Please select a time frame".to_string(),
        });
    };

    let mut form = Record::new().with("timeFrame", time_frame.name());
    if let TimeFrame::Custom { start, end } = time_frame {
        form.insert("startDate", start);
        form.insert("endDate", end);
    }
    let mut result = validate_data(&form, &schemas::csv_import_at(today));
    for field in ["timeFrame", "startDate", "endDate"] {
        if let Some(message) = result.errors.remove(field) {
            return Err(ImportError::Validation {
                field: field.to_string(),
                message,
            });
        }
    }

    if let TimeFrame::Custom { start, end } = time_frame {
        TimeFrame::custom(start, end).map_err(|err| ImportError::Validation {
            field: "startDate".to_string(),
            message: err.to_string(),
        })?;
    }
    Ok(time_frame)
}
