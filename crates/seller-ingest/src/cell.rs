//! Per-cell CSV sanitization and malicious-content detection.
//!
//! A spreadsheet evaluates any cell starting with `=`, `+`, `-` or `@` as a
//! formula. Such cells are prefixed with `'` so they open as text.

use std::sync::LazyLock;

use regex::Regex;

use seller_common::strip_control_chars;

static MALICIOUS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^[=+\-@]",
        r"(?i)javascript:",
        r"(?i)<script",
        r"(?i)data:text/html",
        r"(?i)vbscript:",
        r"(?i)onload=",
        r"(?i)onerror=",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid malicious-pattern regex"))
    .collect()
});

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

/// Returns true if `cell` matches any malicious pattern, formula triggers included.
pub fn is_malicious(cell: &str) -> bool {
    MALICIOUS_PATTERNS.iter().any(|pattern| pattern.is_match(cell))
}

/// Returns true if a spreadsheet would evaluate `cell` as a formula.
pub fn is_formula_trigger(cell: &str) -> bool {
    cell.starts_with(['=', '+', '-', '@'])
}

/// Trims and removes one leading and one trailing quote (`"` or `'`).
///
/// The two ends are stripped independently, so `"abc` gives `abc`.
pub fn unquote_cell(cell: &str) -> &str {
    let trimmed = cell.trim();
    let trimmed = trimmed
        .strip_prefix(['"', '\''])
        .unwrap_or(trimmed);
    trimmed.strip_suffix(['"', '\'']).unwrap_or(trimmed)
}

/// Sanitizes one cell.
///
/// Unquotes, prefixes `'` when the cell matches a malicious pattern, then
/// drops control characters and `<...>` tags.
pub fn sanitize_cell(cell: &str) -> String {
    let unquoted = unquote_cell(cell);
    let neutralized = if is_malicious(unquoted) {
        format!("'{unquoted}")
    } else {
        unquoted.to_string()
    };
    let stripped = strip_control_chars(&neutralized);
    HTML_TAG.replace_all(&stripped, "").into_owned()
}

/// Sanitizes every cell of `content`, keeping the line and cell layout.
pub fn sanitize_csv_content(content: &str) -> String {
    content
        .split('\n')
        .map(|line| {
            line.split(',')
                .map(sanitize_cell)
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
