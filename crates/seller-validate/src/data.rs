//! Whole-record validation.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use seller_common::sanitize_input;
use seller_model::{FieldValue, Record};

use crate::rule::{ValidationSchema, validate_field};

/// Result of [`validate_data`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValidation {
    /// Field name to its first failure message.
    pub errors: BTreeMap<String, String>,
    /// The schema's fields after sanitization, returned even when invalid.
    pub sanitized_data: Record,
}

impl DataValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Sanitizes text values and validates every schema field.
///
/// Fields outside the schema are ignored and not copied into
/// `sanitized_data`. A schema field absent from `data` is validated as `Null`.
pub fn validate_data(data: &Record, schema: &ValidationSchema) -> DataValidation {
    let mut result = DataValidation::default();

    for (name, rule) in schema.iter() {
        let value = match data.value(name) {
            FieldValue::Text(text) => FieldValue::Text(sanitize_input(&text)),
            other => other,
        };

        if let Some(message) = validate_field(&value, rule, name) {
            result.errors.insert(name.to_string(), message);
        }
        result.sanitized_data.insert(name, value);
    }

    debug!(
        fields = schema.len(),
        errors = result.errors.len(),
        "record validated"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ValidationRule;

    fn schema() -> ValidationSchema {
        ValidationSchema::new()
            .field("name", ValidationRule::new().required().max_length(10))
            .field("note", ValidationRule::new())
    }

    #[test]
    fn test_sanitizes_before_validating() {
        let record = Record::new().with("name", "  Mug<script>alert(1)</script>");
        let result = validate_data(&record, &schema());
        assert!(result.is_valid());
        assert_eq!(result.sanitized_data.value("name"), FieldValue::from("Mug"));
    }

    #[test]
    fn test_collects_errors_and_keeps_data() {
        let record = Record::new()
            .with("name", "javascript:")
            .with("note", "ok")
            .with("ignored", "x");
        let result = validate_data(&record, &schema());
        assert_eq!(result.errors["name"], "name is required");
        assert_eq!(result.sanitized_data.value("note"), FieldValue::from("ok"));
        assert!(result.sanitized_data.get("ignored").is_none());
    }

    #[test]
    fn test_absent_fields_are_null() {
        let result = validate_data(&Record::new(), &schema());
        assert_eq!(result.sanitized_data.get("note"), Some(&FieldValue::Null));
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = validate_data(&Record::new().with("name", "Mug"), &schema());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sanitizedData"]["name"], "Mug");
        assert!(json["errors"].as_object().unwrap().is_empty());
    }
}
