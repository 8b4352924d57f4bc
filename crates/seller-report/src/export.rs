//! CSV export of records.

use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use seller_ingest::is_formula_trigger;
use seller_model::{FieldValue, Record};

use crate::common::{dated_file_name, ensure_parent_dir};

/// Prefixes `'` to text a spreadsheet would evaluate as a formula.
///
/// Plain numbers such as `-12.5` are left alone.
pub fn neutralize_formula(cell: &str) -> Cow<'_, str> {
    if is_formula_trigger(cell) && cell.trim().parse::<f64>().is_err() {
        Cow::Owned(format!("'{cell}"))
    } else {
        Cow::Borrowed(cell)
    }
}

fn render(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => neutralize_formula(text).into_owned(),
        other => other.to_text(),
    }
}

/// Writes `headers` and one line per record in header order.
///
/// A header the record lacks is written as an empty cell.
pub fn export_records<W, H>(writer: W, headers: &[H], records: &[Record]) -> Result<()>
where
    W: Write,
    H: AsRef<str>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(headers.iter().map(AsRef::as_ref))
        .context("write export header")?;
    for (index, record) in records.iter().enumerate() {
        csv.write_record(headers.iter().map(|header| render(&record.value(header.as_ref()))))
            .with_context(|| format!("write export record {}", index + 1))?;
    }
    csv.flush().context("flush export")?;
    Ok(())
}

/// Exports records to `path`, creating parent directories.
pub fn write_export<H: AsRef<str>>(path: &Path, headers: &[H], records: &[Record]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    export_records(file, headers, records)?;
    info!(path = %path.display(), records = records.len(), "export written");
    Ok(())
}

/// `{prefix}-data-YYYY-MM-DD.csv`.
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    dated_file_name(&format!("{prefix}-data"), date, "csv")
}
