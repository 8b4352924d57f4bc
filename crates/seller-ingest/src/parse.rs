//! Naive CSV parsing into header-keyed rows.
//!
//! Lines are split on `\n` and cells on `,`. Quotes around a cell are
//! stripped but there is no escaping, so a quoted comma still splits.

use tracing::{debug, info_span, warn};

use seller_model::{CsvConfig, CsvRow, ParsedDataset, ValidationResult};

use crate::cell::{sanitize_csv_content, unquote_cell};
use crate::content::{non_blank_lines, validate_content};
use crate::text::decode_text;

/// Output of [`safe_parse_csv`]: rows plus the content validation that gated them.
#[derive(Debug, Clone, PartialEq)]
pub struct SafeParse {
    /// Sanitized rows; empty when validation failed.
    pub data: ParsedDataset,
    pub validation: ValidationResult,
}

/// Parses CSV text without validation or sanitization.
///
/// Rows whose cell count differs from the header's are left out and their
/// line numbers recorded in [`ParsedDataset::skipped_lines`].
pub fn parse_csv(text: &str) -> ParsedDataset {
    build_dataset(text, |cell| unquote_cell(cell).to_string())
}

/// Validates, sanitizes, then parses CSV text.
///
/// Cells are taken as the sanitizer left them: no second unquoting, so a
/// neutralizing `'` prefix stays in place.
pub fn safe_parse_csv(text: &str, config: &CsvConfig) -> SafeParse {
    let _span = info_span!("safe_parse").entered();

    let validation = validate_content(text, config);
    if !validation.is_valid() {
        debug!(errors = validation.errors().len(), "content rejected");
        return SafeParse {
            data: ParsedDataset::default(),
            validation,
        };
    }

    let sanitized = sanitize_csv_content(text);
    let data = build_dataset(&sanitized, str::to_string);
    debug!(
        rows = data.len(),
        skipped = data.skipped_lines.len(),
        "parsed sanitized content"
    );
    SafeParse { data, validation }
}

/// Decodes `bytes` and runs [`safe_parse_csv`].
///
/// A decoding failure is reported as a single content error.
pub fn safe_parse_bytes(bytes: &[u8], config: &CsvConfig) -> SafeParse {
    match decode_text(bytes) {
        Ok(text) => safe_parse_csv(&text, config),
        Err(err) => {
            warn!("failed to decode CSV content: {err}");
            SafeParse {
                data: ParsedDataset::default(),
                validation: ValidationResult::failed(format!(
                    "Failed to parse CSV content: {err}"
                )),
            }
        }
    }
}

fn build_dataset(text: &str, cell: impl Fn(&str) -> String) -> ParsedDataset {
    let lines = non_blank_lines(text);
    let Some((header_line, data_lines)) = lines.split_first() else {
        return ParsedDataset::default();
    };
    let headers: Vec<String> = header_line.split(',').map(&cell).collect();

    let mut rows = Vec::with_capacity(data_lines.len());
    let mut skipped_lines = Vec::new();
    for (index, line) in data_lines.iter().enumerate() {
        let cells: Vec<String> = line.split(',').map(&cell).collect();
        if cells.len() == headers.len() {
            rows.push(CsvRow::from_cells(&headers, &cells));
        } else {
            // Header is line 1.
            let line_number = index + 2;
            warn!(
                line = line_number,
                cells = cells.len(),
                expected = headers.len(),
                "skipping row with mismatched column count"
            );
            skipped_lines.push(line_number);
        }
    }

    ParsedDataset {
        headers,
        rows,
        skipped_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let data = parse_csv("date,revenue\n2024-01-01,100\n2024-01-02,\"250\"\n");
        assert_eq!(data.headers, ["date", "revenue"]);
        assert_eq!(data.len(), 2);
        assert_eq!(data.rows[1].get("revenue"), Some("250"));
        assert!(data.skipped_lines.is_empty());
    }

    #[test]
    fn test_header_only_has_no_rows() {
        let data = parse_csv("date,revenue\n");
        assert!(data.is_empty());
        assert!(parse_csv("").is_empty());
    }

    #[test]
    fn test_mismatched_rows_are_recorded() {
        let data = parse_csv("a,b\n1,2,3\n\n4,5\n6\n");
        assert_eq!(data.len(), 1);
        assert_eq!(data.rows[0].get("a"), Some("4"));
        assert_eq!(data.skipped_lines, [2, 4]);
    }

    #[test]
    fn test_duplicate_header_keeps_last_value() {
        let data = parse_csv("sku,sku\nA,B\n");
        assert_eq!(data.rows[0].len(), 1);
        assert_eq!(data.rows[0].get("sku"), Some("B"));
    }

    #[test]
    fn test_safe_parse_rejects_invalid_content() {
        let result = safe_parse_csv("   \n", &CsvConfig::default());
        assert!(!result.validation.is_valid());
        assert!(result.data.is_empty());
        assert!(result.data.headers.is_empty());
    }

    #[test]
    fn test_safe_parse_sanitizes_cells() {
        let text = "name,note\n\"Mug\",<b>bold</b>\n";
        let result = safe_parse_csv(text, &CsvConfig::default());
        assert!(result.validation.is_valid());
        assert_eq!(result.data.rows[0].get("name"), Some("Mug"));
        assert_eq!(result.data.rows[0].get("note"), Some("bold"));
    }

    #[test]
    fn test_neutralizing_quote_survives_past_scan_window() {
        let mut text = String::from("sku,delta\n");
        for i in 0..120 {
            text.push_str(&format!("S{i},{i}\n"));
        }
        text.push_str("LATE,=1+1\n");
        let result = safe_parse_csv(&text, &CsvConfig::default());
        assert!(result.validation.is_valid());
        let last = result.data.rows.last().unwrap();
        assert_eq!(last.get("delta"), Some("'=1+1"));
    }

    #[test]
    fn test_quoted_formula_is_neutralized_after_validation() {
        let result = safe_parse_csv("sku,total\nA1,\"=SUM(B1)\"\n", &CsvConfig::default());
        assert!(result.validation.is_valid());
        assert_eq!(result.data.rows[0].get("total"), Some("'=SUM(B1)"));
    }

    #[test]
    fn test_safe_parse_bytes_decode_failure() {
        let result = safe_parse_bytes(b"a,b\n\xFF,1\n", &CsvConfig::default());
        assert_eq!(
            result.validation.errors(),
            ["Failed to parse CSV content: invalid UTF-8 text: invalid byte sequence at offset 4"]
        );
        assert!(result.data.is_empty());
    }
}
