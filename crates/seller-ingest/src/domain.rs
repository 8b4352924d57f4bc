//! Required-column checks per import kind.

use tracing::debug;

use seller_model::{ImportKind, ParsedDataset};

/// Required names not found in `headers`.
///
/// A name is found when some header, lowercased, contains it lowercased, so
/// `Revenue (USD)` satisfies `revenue`.
pub fn missing_columns<H, R>(headers: &[H], required: &[R]) -> Vec<String>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    let lowered: Vec<String> = headers.iter().map(|h| h.as_ref().to_lowercase()).collect();
    required
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| {
            let name = name.to_lowercase();
            !lowered.iter().any(|header| header.contains(&name))
        })
        .map(str::to_string)
        .collect()
}

/// Checks that the first row of `dataset` carries every column `kind` needs.
///
/// An empty dataset has none of them. On failure the missing names are returned.
pub fn check_columns(dataset: &ParsedDataset, kind: ImportKind) -> Result<(), Vec<String>> {
    let required = kind.required_columns();
    let Some(first) = dataset.rows.first() else {
        return Err(required.iter().map(|name| name.to_string()).collect());
    };
    let headers: Vec<&str> = first.headers().collect();
    let missing = missing_columns(&headers, required);
    debug!(kind = kind.label(), missing = missing.len(), "column check");
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}
