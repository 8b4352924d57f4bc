//! File to rows: file checks, decoding, content validation and parsing together.

use std::fs;

use seller_ingest::{
    RawFile, check_columns, parse_csv, safe_parse_bytes, validate_content, validate_file,
};
use seller_model::{CsvConfig, ImportKind};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn sales_file_end_to_end() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "Sales.CSV",
        b"Date,Revenue (USD),Orders\n2024-01-01,\"1,200\",3\n2024-01-02,450,12\n",
    );
    let file = RawFile::read(&path).expect("read file");
    let config = CsvConfig::default().with_required_columns(["date", "revenue"]);

    assert!(validate_file(&file.info, &config).is_valid());

    let parsed = safe_parse_bytes(&file.bytes, &config);
    assert!(parsed.validation.is_valid());
    // The quoted thousands separator splits the first data row.
    assert_eq!(
        parsed.validation.warnings(),
        ["Row 2 has 4 columns, expected 3"]
    );
    assert_eq!(parsed.data.len(), 1);
    assert_eq!(parsed.data.skipped_lines, [2]);
    assert_eq!(parsed.data.rows[0].get("Revenue (USD)"), Some("450"));
    assert!(check_columns(&parsed.data, ImportKind::Sales).is_ok());
}

#[test]
fn extra_cell_row_is_warned_then_dropped() {
    let text = "date,revenue\n2024-01-01,100,extra\n2024-01-02,200\n";
    let validation = validate_content(text, &CsvConfig::default());
    assert!(validation.is_valid());
    assert_eq!(validation.warnings(), ["Row 2 has 3 columns, expected 2"]);

    let parsed = parse_csv(text);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.rows[0].get("date"), Some("2024-01-02"));
    assert_eq!(parsed.skipped_lines, [2]);
}

#[test]
fn formula_row_fails_closed() {
    let config = CsvConfig::default();
    let parsed = safe_parse_bytes(b"name,price\n=cmd|' /C calc'!A0,10\n", &config);
    assert_eq!(
        parsed.validation.errors(),
        ["Potentially malicious content detected in row 2"]
    );
    assert!(parsed.data.is_empty());
}

#[test]
fn bom_prefixed_export_parses() {
    let config = CsvConfig::default().with_required_columns(["sku"]);
    let parsed = safe_parse_bytes(b"\xEF\xBB\xBFsku,stock\r\nA1,5\r\n", &config);
    assert!(parsed.validation.is_valid());
    assert_eq!(parsed.data.headers, ["sku", "stock"]);
    assert_eq!(parsed.data.rows[0].get("stock"), Some("5"));
}

#[test]
fn rejected_file_type_and_size() {
    let config = CsvConfig {
        max_file_size: 16,
        ..CsvConfig::default()
    };
    let file = RawFile::from_bytes("report.xlsx", vec![b'x'; 32]);
    let result = validate_file(&file.info, &config);
    assert_eq!(
        result.errors(),
        [
            "File size (0.00MB) exceeds maximum allowed size (0.00MB)",
            "File type \".xlsx\" is not allowed. Allowed types: .csv, .txt",
        ]
    );
}

#[test]
fn missing_domain_columns_are_listed() {
    let parsed = parse_csv("sku,stock\nA1,5\n");
    let missing = check_columns(&parsed, ImportKind::Inventory).unwrap_err();
    assert_eq!(missing, ["product", "status", "inbound", "velocity"]);
}
