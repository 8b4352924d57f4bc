//! Numeric coercion for decorated marketplace values.
//!
//! Seller reports carry numbers as `$1,234.50`, `18%`, `0.18` or plain
//! `1234`. These functions strip the decoration and return a finite `f64`,
//! or `None` when nothing numeric is left.

use seller_model::FieldValue;

use crate::sanitize::sanitize_input;

/// Coerces a value to a finite number.
///
/// Numbers pass through when finite. Anything else is rendered as text,
/// sanitized, reduced to digits, `.` and `-`, and the longest numeric prefix
/// is parsed (`"12.5.1"` gives 12.5, `"1e5"` gives 15).
pub fn sanitize_number(value: &FieldValue) -> Option<f64> {
    if let FieldValue::Number(n) = value {
        return n.is_finite().then_some(*n);
    }
    let sanitized = sanitize_input(&value.to_text());
    let cleaned: String = sanitized
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect();
    parse_number_prefix(&cleaned)
}

/// Coerces a currency amount: drops `$`, thousands separators and whitespace.
pub fn sanitize_currency(value: &FieldValue) -> Option<f64> {
    let sanitized = sanitize_input(&value.to_text());
    let cleaned: String = sanitized
        .chars()
        .filter(|ch| *ch != '$' && *ch != ',' && !ch.is_whitespace())
        .collect();
    sanitize_number(&FieldValue::Text(cleaned))
}

/// Coerces a percentage, inferring the unit.
///
/// - input containing `%` is already a percentage: `"18%"` gives 18
/// - otherwise a value of at most 1 is a fraction: `"0.18"` gives 18
/// - otherwise the value is taken as a percentage: `"45"` gives 45
///
/// Reapplying this to an already-coerced value in `(0, 1]` is not idempotent
/// (`0.5` becomes 50, then 50 stays 50).
pub fn sanitize_percentage(value: &FieldValue) -> Option<f64> {
    let sanitized = sanitize_input(&value.to_text());
    let cleaned: String = sanitized
        .chars()
        .filter(|ch| *ch != '%' && !ch.is_whitespace())
        .collect();
    let number = sanitize_number(&FieldValue::Text(cleaned))?;

    if sanitized.contains('%') {
        Some(number)
    } else if number <= 1.0 {
        Some(number * 100.0)
    } else {
        Some(number)
    }
}

/// Parses the longest leading decimal number of `text`.
///
/// Accepts an optional `-`, digits, and an optional fractional part. No
/// exponent. Returns `None` without a digit or when the result is not finite.
pub fn parse_number_prefix(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits > 0 || frac_digits > 0 {
            digits += frac_digits;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }
    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> FieldValue {
        FieldValue::from(value)
    }

    fn approx(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("expected a number");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(sanitize_number(&FieldValue::from(12.5)), Some(12.5));
        assert_eq!(sanitize_number(&FieldValue::from(f64::INFINITY)), None);
        assert_eq!(sanitize_number(&FieldValue::from(f64::NAN)), None);
    }

    #[test]
    fn test_text_numbers() {
        assert_eq!(sanitize_number(&text("123")), Some(123.0));
        assert_eq!(sanitize_number(&text("-45.67")), Some(-45.67));
        assert_eq!(sanitize_number(&text("  7 units")), Some(7.0));
        assert_eq!(sanitize_number(&text("12.5.1")), Some(12.5));
        assert_eq!(sanitize_number(&text(".5")), Some(0.5));
    }

    #[test]
    fn test_non_numeric() {
        assert_eq!(sanitize_number(&text("abc")), None);
        assert_eq!(sanitize_number(&text("")), None);
        assert_eq!(sanitize_number(&text("-")), None);
        assert_eq!(sanitize_number(&text("--5")), None);
        assert_eq!(sanitize_number(&FieldValue::Null), None);
        assert_eq!(sanitize_number(&FieldValue::from(true)), None);
    }

    #[test]
    fn test_currency() {
        assert_eq!(sanitize_currency(&text("$1,234.50")), Some(1234.5));
        assert_eq!(sanitize_currency(&text(" $ 99 ")), Some(99.0));
        assert_eq!(sanitize_currency(&FieldValue::from(10.0)), Some(10.0));
        assert_eq!(sanitize_currency(&text("n/a")), None);
    }

    #[test]
    fn test_percentage_units() {
        approx(sanitize_percentage(&text("18%")), 18.0);
        approx(sanitize_percentage(&text("0.18")), 18.0);
        approx(sanitize_percentage(&text("45")), 45.0);
        approx(sanitize_percentage(&text("1")), 100.0);
        approx(sanitize_percentage(&text("0.5 %")), 0.5);
        assert_eq!(sanitize_percentage(&text("%")), None);
    }

    #[test]
    fn test_percentage_reapplication() {
        // Suffix present: stable.
        let once = sanitize_percentage(&text("18%")).unwrap();
        approx(sanitize_percentage(&text(&format!("{once}%"))), 18.0);
        // Fraction: 0.5 -> 50 -> 50.
        let once = sanitize_percentage(&text("0.5")).unwrap();
        approx(sanitize_percentage(&FieldValue::from(once)), 50.0);
    }

    #[test]
    fn test_prefix_parser() {
        assert_eq!(parse_number_prefix("5."), Some(5.0));
        assert_eq!(parse_number_prefix("-.25"), Some(-0.25));
        assert_eq!(parse_number_prefix("1-2"), Some(1.0));
        assert_eq!(parse_number_prefix("."), None);
        assert_eq!(parse_number_prefix(""), None);
    }
}
