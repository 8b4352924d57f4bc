//! Per-type coercion of field values.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use seller_common::{sanitize_currency, sanitize_input, sanitize_number, sanitize_percentage};
use seller_model::FieldValue;

use crate::types::FieldType;

/// Coerces `value` to `field_type`. Unparseable input becomes `Null`.
pub fn coerce(value: FieldValue, field_type: FieldType) -> FieldValue {
    match field_type {
        FieldType::String => FieldValue::Text(sanitize_input(&value.to_text())),
        FieldType::Number => sanitize_number(&value).into(),
        FieldType::Currency => sanitize_currency(&value).into(),
        FieldType::Percentage => sanitize_percentage(&value).into(),
        FieldType::Date => coerce_date(&value).into(),
        FieldType::Boolean => FieldValue::Bool(to_boolean(&value)),
        FieldType::Array => FieldValue::List(to_array(&value)),
    }
}

fn coerce_date(value: &FieldValue) -> Option<NaiveDate> {
    match value {
        FieldValue::Date(date) => Some(*date),
        FieldValue::Text(text) => parse_date(text),
        // Epoch milliseconds; zero counts as unset.
        FieldValue::Number(millis) if *millis != 0.0 && millis.is_finite() => {
            DateTime::from_timestamp_millis(*millis as i64).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

/// Parses a calendar date from common export formats.
///
/// Datetimes are cut to their date as written: `2024-01-15T23:30:00-05:00`
/// gives 2024-01-15. Day-first formats win over month-first when both fit.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    try_parse_datetime(text)
        .map(|dt| dt.date())
        .or_else(|| try_parse_date(text))
        .or_else(|| try_parse_partial_date(text))
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d-%b-%Y",  // 15-Jan-2024
        "%d/%m/%Y",  // 15/01/2024
        "%m/%d/%Y",  // 01/15/2024
        "%d.%m.%Y",  // 15.01.2024
        "%b %d, %Y", // Jan 15, 2024
        "%B %d, %Y", // January 15, 2024
        "%d %b %Y",  // 15 Jan 2024
        "%d %B %Y",  // 15 January 2024
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// `2024` and `2024-03` resolve to the first day of the year or month.
fn try_parse_partial_date(value: &str) -> Option<NaiveDate> {
    let (year, month) = match value.split_once('-') {
        Some((year, month)) if month.len() == 2 => (year, month.parse().ok()?),
        Some(_) => return None,
        None => (value, 1),
    };
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// `true`, `1`, `yes`, `on` (any case) and non-zero numbers are true.
pub fn to_boolean(value: &FieldValue) -> bool {
    match value {
        FieldValue::Bool(b) => *b,
        FieldValue::Text(text) => matches!(
            text.to_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        FieldValue::Number(n) => *n != 0.0,
        other => other.is_truthy(),
    }
}

/// Sanitized list items. Text is split on `,` and empty items are dropped.
pub fn to_array(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::List(items) => items.iter().map(|item| sanitize_input(item)).collect(),
        FieldValue::Text(text) => text
            .split(',')
            .map(|item| sanitize_input(item.trim()))
            .filter(|item| !item.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}
