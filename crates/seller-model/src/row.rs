//! Rows as parsed from CSV text and records after transformation.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::FieldValue;

/// One CSV data line keyed by header.
///
/// Column order follows the header line. A duplicated header keeps the
/// position of its first occurrence and the value of its last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    fields: Vec<(String, String)>,
}

impl CsvRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row by pairing headers with cells positionally.
    pub fn from_cells<H, C>(headers: &[H], cells: &[C]) -> Self
    where
        H: AsRef<str>,
        C: AsRef<str>,
    {
        let mut row = Self::new();
        for (header, cell) in headers.iter().zip(cells) {
            row.insert(header.as_ref(), cell.as_ref());
        }
        row
    }

    /// Sets a column value, replacing an existing one in place.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == header) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((header, value)),
        }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value.as_str())
    }

    /// Column names in header order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for CsvRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Result of parsing CSV text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDataset {
    /// Column names from the header line.
    pub headers: Vec<String>,
    /// Data rows in file order.
    pub rows: Vec<CsvRow>,
    /// 1-based line numbers (among non-blank lines) excluded because their
    /// cell count differed from the header's.
    pub skipped_lines: Vec<usize>,
}

impl ParsedDataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows, for previews.
    pub fn preview(&self, n: usize) -> &[CsvRow] {
        &self.rows[..self.rows.len().min(n)]
    }
}

/// A typed record: field name to [`FieldValue`], in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, replacing an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Value of `name`, or `Null` when absent.
    pub fn value(&self, name: &str) -> FieldValue {
        self.get(name).cloned().unwrap_or(FieldValue::Null)
    }

    /// Numeric value of `name`, if the field holds a number.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<&CsvRow> for Record {
    fn from(row: &CsvRow) -> Self {
        let mut record = Record::new();
        for (name, value) in row.iter() {
            record.insert(name, value);
        }
        record
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_preserves_header_order() {
        let row = CsvRow::from_cells(&["b", "a", "c"], &["2", "1", "3"]);
        assert_eq!(row.headers().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(row.get("a"), Some("1"));
    }

    #[test]
    fn duplicate_header_last_value_wins() {
        let row = CsvRow::from_cells(&["sku", "qty", "sku"], &["A", "1", "B"]);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("sku"), Some("B"));
        assert_eq!(row.headers().next(), Some("sku"));
    }

    #[test]
    fn record_from_row_is_text() {
        let row = CsvRow::from_cells(&["revenue"], &["100"]);
        let record = Record::from(&row);
        assert_eq!(record.get("revenue"), Some(&FieldValue::from("100")));
        assert_eq!(record.value("missing"), FieldValue::Null);
    }

    #[test]
    fn preview_is_bounded() {
        let dataset = ParsedDataset {
            headers: vec!["a".to_string()],
            rows: (0..8)
                .map(|i| CsvRow::from_cells(&["a"], &[i.to_string()]))
                .collect(),
            skipped_lines: Vec::new(),
        };
        assert_eq!(dataset.preview(5).len(), 5);
        assert_eq!(dataset.preview(20).len(), 8);
    }

    #[test]
    fn record_serializes_in_order() {
        let record = Record::new().with("z", 1.0).with("a", "x");
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"z":1.0,"a":"x"}"#
        );
    }
}
