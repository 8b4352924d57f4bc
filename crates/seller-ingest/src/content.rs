//! Structural and security validation of CSV text.

use tracing::{debug, warn};

use seller_model::{CsvConfig, ValidationResult};

use crate::cell::{is_malicious, unquote_cell};
use crate::domain::missing_columns;

/// Lines (header included) inspected for column-count and malicious-content checks.
pub const CONTENT_SCAN_LIMIT: usize = 100;

const MALICIOUS_ROW: &str = "Potentially malicious content detected in row";

/// True for the validation errors raised by the malicious-pattern scan.
pub fn is_security_finding(message: &str) -> bool {
    message.starts_with(MALICIOUS_ROW)
}

/// Validates the structure of `content` against `config`.
///
/// Only the first [`CONTENT_SCAN_LIMIT`] lines are scanned cell by cell;
/// the row limit applies to the whole file.
pub fn validate_content(content: &str, config: &CsvConfig) -> ValidationResult {
    let lines = non_blank_lines(content);
    if lines.is_empty() {
        return ValidationResult::failed("CSV file is empty");
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if lines.len() > config.max_rows {
        errors.push(format!(
            "Too many rows ({}). Maximum allowed: {}",
            lines.len(),
            config.max_rows
        ));
    }

    let headers: Vec<&str> = lines[0].split(',').map(unquote_cell).collect();
    if headers.len() > config.max_columns {
        errors.push(format!(
            "Too many columns ({}). Maximum allowed: {}",
            headers.len(),
            config.max_columns
        ));
    }

    let missing = missing_columns(&headers, &config.required_columns);
    if !missing.is_empty() {
        errors.push(format!("Missing required columns: {}", missing.join(", ")));
    }

    let duplicates = duplicate_headers(&headers);
    if !duplicates.is_empty() {
        warnings.push(format!(
            "Duplicate column headers found: {}",
            duplicates.join(", ")
        ));
    }

    for (index, line) in lines
        .iter()
        .enumerate()
        .take(CONTENT_SCAN_LIMIT)
        .skip(1)
    {
        let row_number = index + 1;
        let cells: Vec<&str> = line.split(',').collect();
        if cells.len() != headers.len() {
            warnings.push(format!(
                "Row {row_number} has {} columns, expected {}",
                cells.len(),
                headers.len()
            ));
        }
        if cells.iter().any(|cell| is_malicious(cell.trim())) {
            warn!(row = row_number, "malicious content pattern in CSV row");
            errors.push(format!("{MALICIOUS_ROW} {row_number}"));
        }
    }

    debug!(
        lines = lines.len(),
        columns = headers.len(),
        errors = errors.len(),
        warnings = warnings.len(),
        "content validation complete"
    );
    ValidationResult::new(errors, warnings)
}

/// Lines of `content` split on `\n` whose trimmed form is non-empty.
pub(crate) fn non_blank_lines(content: &str) -> Vec<&str> {
    content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Every header occurrence after the first, in order.
fn duplicate_headers<'a>(headers: &[&'a str]) -> Vec<&'a str> {
    headers
        .iter()
        .enumerate()
        .filter(|(index, header)| headers[..*index].contains(header))
        .map(|(_, header)| *header)
        .collect()
}
