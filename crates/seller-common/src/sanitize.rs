//! Text sanitization for untrusted input.
//!
//! Pattern stripping narrows what reaches downstream code but is not a
//! security boundary on its own: imported text is still treated as inert data
//! and never rendered into markup or executed.

use std::sync::LazyLock;

use regex::Regex;
use seller_model::FieldValue;

/// Script blocks, script-capable URI schemes, inline event handlers and
/// embedding tags. Each match is replaced with the empty string.
static DANGEROUS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)<script\b.*?</script>",
        r"(?i)javascript:",
        r"(?i)vbscript:",
        r"(?i)onload\s*=",
        r"(?i)onerror\s*=",
        r"(?i)onclick\s*=",
        r"(?i)onmouseover\s*=",
        r"(?i)<iframe\b[^>]*>",
        r"(?i)<object\b[^>]*>",
        r"(?i)<embed\b[^>]*>",
        r"(?i)<link\b[^>]*>",
        r"(?i)<meta\b[^>]*>",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid dangerous-pattern regex"))
    .collect()
});

/// Removes dangerous substrings and control characters, then trims.
pub fn sanitize_input(input: &str) -> String {
    let mut sanitized = input.to_string();
    for pattern in DANGEROUS_PATTERNS.iter() {
        if pattern.is_match(&sanitized) {
            sanitized = pattern.replace_all(&sanitized, "").into_owned();
        }
    }
    strip_control_chars(&sanitized).trim().to_string()
}

/// Sanitizes any value by its text rendering.
pub fn sanitize_value(value: &FieldValue) -> String {
    sanitize_input(&value.to_text())
}

/// Drops ASCII control characters other than tab, line feed and carriage return.
pub fn strip_control_chars(input: &str) -> String {
    input.chars().filter(|ch| !is_stripped_control(*ch)).collect()
}

fn is_stripped_control(ch: char) -> bool {
    matches!(
        ch,
        '\u{00}'..='\u{08}' | '\u{0b}' | '\u{0c}' | '\u{0e}'..='\u{1f}' | '\u{7f}'
    )
}
