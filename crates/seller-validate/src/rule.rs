//! Validation rules and single-field validation.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use seller_common::sanitize_number;
use seller_model::FieldValue;

/// Extra check run after the built-in ones. Returns a message on failure.
pub type CustomCheck = Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

/// Constraints on one field. Unset constraints are skipped.
#[derive(Clone, Default)]
pub struct ValidationRule {
    pub required: bool,
    /// Minimum length in characters. Zero disables the check.
    pub min_length: Option<usize>,
    /// Maximum length in characters. Zero disables the check.
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub custom: Option<CustomCheck>,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: &Regex) -> Self {
        self.pattern = Some(pattern.clone());
        self
    }

    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("min", &self.min)
            .field("max", &self.max)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Ordered field rules.
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    fields: Vec<(String, ValidationRule)>,
}

impl ValidationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing an existing rule of the same name in place.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rule: ValidationRule) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = rule,
            None => self.fields.push((name, rule)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ValidationRule> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Checks `value` against `rule`; the first failure wins.
///
/// Order: required, length, pattern, numeric range, custom. An empty value
/// that is not required passes without further checks. Length and pattern
/// apply to the text rendering of the value; the range applies to
/// [`sanitize_number`] of it, and a non-numeric value fails any range bound.
pub fn validate_field(value: &FieldValue, rule: &ValidationRule, field: &str) -> Option<String> {
    if value.is_missing() {
        return rule.required.then(|| format!("{field} is required"));
    }

    let text = value.to_text();
    let length = text.chars().count();

    if let Some(min_length) = rule.min_length.filter(|n| *n > 0)
        && length < min_length
    {
        return Some(format!("{field} must be at least {min_length} characters"));
    }

    if let Some(max_length) = rule.max_length.filter(|n| *n > 0)
        && length > max_length
    {
        return Some(format!("{field} must not exceed {max_length} characters"));
    }

    if let Some(pattern) = &rule.pattern
        && !pattern.is_match(&text)
    {
        return Some(format!("{field} format is invalid"));
    }

    let number = sanitize_number(value);
    if let Some(min) = rule.min
        && number.is_none_or(|n| n < min)
    {
        return Some(format!("{field} must be at least {min}"));
    }

    if let Some(max) = rule.max
        && number.is_none_or(|n| n > max)
    {
        return Some(format!("{field} must not exceed {max}"));
    }

    rule.custom.as_ref().and_then(|check| check(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;

    fn text(value: &str) -> FieldValue {
        FieldValue::from(value)
    }

    #[test]
    fn test_required() {
        let rule = ValidationRule::new().required();
        assert_eq!(
            validate_field(&FieldValue::Null, &rule, "sku"),
            Some("sku is required".to_string())
        );
        assert_eq!(
            validate_field(&text(""), &rule, "sku"),
            Some("sku is required".to_string())
        );
        assert_eq!(validate_field(&text("A"), &rule, "sku"), None);
    }

    #[test]
    fn test_optional_empty_skips_everything() {
        let rule = ValidationRule::new()
            .min_length(3)
            .pattern(&patterns::SKU)
            .min(1.0)
            .custom(|_| Some("never".to_string()));
        assert_eq!(validate_field(&text(""), &rule, "sku"), None);
    }

    #[test]
    fn test_lengths() {
        let rule = ValidationRule::new().min_length(2).max_length(4);
        assert_eq!(
            validate_field(&text("a"), &rule, "code"),
            Some("code must be at least 2 characters".to_string())
        );
        assert_eq!(
            validate_field(&text("abcde"), &rule, "code"),
            Some("code must not exceed 4 characters".to_string())
        );
        assert_eq!(validate_field(&text("\u{e9}\u{e9}\u{e9}"), &rule, "code"), None);
    }

    #[test]
    fn test_zero_length_limits_are_ignored() {
        let rule = ValidationRule::new().max_length(0);
        assert_eq!(validate_field(&text("anything"), &rule, "x"), None);
    }

    #[test]
    fn test_pattern() {
        let rule = ValidationRule::new().pattern(&patterns::ASIN);
        assert_eq!(
            validate_field(&text("b0"), &rule, "asin"),
            Some("asin format is invalid".to_string())
        );
    }

    #[test]
    fn test_range() {
        let rule = ValidationRule::new().min(0.0).max(999999.99);
        assert_eq!(validate_field(&text("$12.50"), &rule, "price"), None);
        assert_eq!(
            validate_field(&text("-1"), &rule, "price"),
            Some("price must be at least 0".to_string())
        );
        assert_eq!(
            validate_field(&FieldValue::Number(1e7), &rule, "price"),
            Some("price must not exceed 999999.99".to_string())
        );
        assert_eq!(
            validate_field(&text("n/a"), &rule, "price"),
            Some("price must be at least 0".to_string())
        );
    }

    #[test]
    fn test_custom_runs_last() {
        let rule = ValidationRule::new()
            .max_length(3)
            .custom(|_| Some("custom failure".to_string()));
        assert_eq!(
            validate_field(&text("abcd"), &rule, "f"),
            Some("f must not exceed 3 characters".to_string())
        );
        assert_eq!(
            validate_field(&text("ab"), &rule, "f"),
            Some("custom failure".to_string())
        );
    }

    #[test]
    fn test_schema_order_and_replace() {
        let schema = ValidationSchema::new()
            .field("b", ValidationRule::new())
            .field("a", ValidationRule::new())
            .field("b", ValidationRule::new().required());
        let names: Vec<_> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["b", "a"]);
        assert!(schema.get("b").unwrap().required);
    }
}
