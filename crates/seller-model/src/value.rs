//! Typed cell values.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// A single field value.
///
/// Parsed CSV cells start out as [`FieldValue::Text`]; the schema transformer
/// turns them into the variant the field's declared type calls for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    List(Vec<String>),
}

impl FieldValue {
    /// True for `Null` and empty text; these count as "not provided".
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Truthiness used when a value must collapse to a boolean.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Bool(b) => *b,
            FieldValue::Date(_) | FieldValue::List(_) => true,
        }
    }

    /// Renders the value as text. Lists are comma-joined, dates are `YYYY-MM-DD`.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            FieldValue::List(items) => items.join(","),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values() {
        assert!(FieldValue::Null.is_missing());
        assert!(FieldValue::from("").is_missing());
        assert!(!FieldValue::from(" ").is_missing());
        assert!(!FieldValue::from(0.0).is_missing());
        assert!(!FieldValue::from(false).is_missing());
    }

    #[test]
    fn text_rendering() {
        assert_eq!(FieldValue::from(18.0).to_text(), "18");
        assert_eq!(FieldValue::from(1.5).to_text(), "1.5");
        assert_eq!(FieldValue::from(true).to_text(), "true");
        assert_eq!(
            FieldValue::from(vec!["a".to_string(), "b".to_string()]).to_text(),
            "a,b"
        );
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(FieldValue::from(date).to_text(), "2024-01-05");
        assert_eq!(FieldValue::Null.to_text(), "");
    }

    #[test]
    fn truthiness() {
        assert!(!FieldValue::Null.is_truthy());
        assert!(!FieldValue::from("").is_truthy());
        assert!(FieldValue::from("no").is_truthy());
        assert!(!FieldValue::from(0.0).is_truthy());
        assert!(FieldValue::List(Vec::new()).is_truthy());
    }

    #[test]
    fn serializes_untagged() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            serde_json::to_string(&FieldValue::from(date)).unwrap(),
            "\"2024-01-05\""
        );
        assert_eq!(serde_json::to_string(&FieldValue::Null).unwrap(), "null");
        assert_eq!(serde_json::to_string(&FieldValue::from(2.5)).unwrap(), "2.5");
    }
}
