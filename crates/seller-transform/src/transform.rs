//! Record and batch transformation.

use tracing::{debug, info_span, warn};

use seller_model::{CsvRow, FieldValue, Record, ValidationResult};

use crate::coerce::coerce;
use crate::error::{Result, TransformError};
use crate::types::TransformationSchema;

/// Transforms one record according to `schema`.
///
/// The output holds exactly the schema's fields, in schema order. Fields of
/// the input that the schema does not name are dropped.
///
/// # Errors
///
/// [`TransformError::MissingRequired`] when a required field is `Null` or
/// empty text. A present value that fails to coerce is not an error; it
/// becomes `Null`.
pub fn transform_record(record: &Record, schema: &TransformationSchema) -> Result<Record> {
    let mut transformed = Record::new();

    for (name, rule) in schema.iter() {
        let mut value = record.value(name);

        if value.is_missing() {
            if rule.required {
                return Err(TransformError::MissingRequired {
                    field: name.to_string(),
                });
            }
            value = rule.default_value.clone().unwrap_or(FieldValue::Null);
        }

        if value == FieldValue::Null {
            transformed.insert(name, FieldValue::Null);
            continue;
        }

        if let Some(transform) = &rule.transform {
            value = transform(value);
        }

        transformed.insert(name, coerce(value, rule.field_type));
    }

    Ok(transformed)
}

/// Transforms every record, stopping at the first failure.
///
/// # Errors
///
/// [`TransformError::Record`] carrying the 1-based index of the failing record.
pub fn transform_batch(records: &[Record], schema: &TransformationSchema) -> Result<Vec<Record>> {
    let _span = info_span!("transform_batch", records = records.len()).entered();

    let transformed = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            transform_record(record, schema).map_err(|source| {
                warn!(record = index + 1, "transformation failed: {source}");
                TransformError::Record {
                    index: index + 1,
                    source: Box::new(source),
                }
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(records = transformed.len(), "batch transformed");
    Ok(transformed)
}

/// Transforms parsed CSV rows, each cell taken as text.
pub fn transform_rows(rows: &[CsvRow], schema: &TransformationSchema) -> Result<Vec<Record>> {
    let records: Vec<Record> = rows.iter().map(Record::from).collect();
    transform_batch(&records, schema)
}

/// Compares a batch with its transformation.
///
/// Reports a record count mismatch, and every field that is `Null` after
/// transformation although the original record had a value for it. Empty
/// text counts as a value here, so a blank optional field without a default
/// is reported too.
pub fn verify_transformed(original: &[Record], transformed: &[Record]) -> ValidationResult {
    let mut errors = Vec::new();

    if original.len() != transformed.len() {
        errors.push(format!(
            "Record count mismatch: original {}, transformed {}",
            original.len(),
            transformed.len()
        ));
    }

    for (index, (before, after)) in original.iter().zip(transformed).enumerate() {
        for (name, value) in after.iter() {
            let had_value = before
                .get(name)
                .is_some_and(|original| *original != FieldValue::Null);
            if *value == FieldValue::Null && had_value {
                errors.push(format!(
                    "Data loss detected in record {}, field '{name}'",
                    index + 1
                ));
            }
        }
    }

    ValidationResult::new(errors, Vec::new())
}
