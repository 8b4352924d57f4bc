//! Common field patterns.

use std::sync::LazyLock;

use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid validation pattern regex")
}

pub static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Optional `+`, then at least ten digits, spaces, dashes or parentheses.
pub static PHONE: LazyLock<Regex> = LazyLock::new(|| compile(r"^\+?[0-9\s\-()]{10,}$"));

pub static ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-zA-Z0-9]+$"));

pub static NUMERIC: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]+$"));

/// Up to two decimal places.
pub static DECIMAL: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]+(\.[0-9]{1,2})?$"));

/// Amazon Standard Identification Number: ten uppercase letters or digits.
pub static ASIN: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Z0-9]{10}$"));

pub static SKU: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Z0-9\-_]{3,50}$"));

/// `$1,234.56` style amounts; the thousands separators must be well placed.
pub static CURRENCY: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\$?[0-9]{1,3}(,[0-9]{3})*(\.[0-9]{2})?$"));

pub static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[0-9]{1,3}(\.[0-9]{1,2})?%?$"));

/// ISO calendar date shape only; `2024-02-30` matches.
pub static DATE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"));

pub static URL: LazyLock<Regex> = LazyLock::new(|| compile(r"^https?://.+"));

/// Letters, whitespace, apostrophes and hyphens.
pub static PERSON_NAME: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-zA-Z\s'-]+$"));

/// HTML-like tag anywhere in the text.
pub(crate) static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"<[^>]*>"));
