//! Predefined validation schemas.

use chrono::{Local, NaiveDate};

use seller_common::{sanitize_number, sanitize_percentage};
use seller_model::{FieldValue, TimeFrame};

use crate::patterns::{self, HTML_TAG};
use crate::rule::{ValidationRule, ValidationSchema};

fn no_html(message: &'static str) -> impl Fn(&FieldValue) -> Option<String> + Send + Sync {
    move |value| {
        HTML_TAG
            .is_match(&value.to_text())
            .then(|| message.to_string())
    }
}

fn numeric(message: &'static str) -> impl Fn(&FieldValue) -> Option<String> + Send + Sync {
    move |value| sanitize_number(value).is_none().then(|| message.to_string())
}

/// Catalog product form.
pub fn product() -> ValidationSchema {
    ValidationSchema::new()
        .field(
            "name",
            ValidationRule::new()
                .required()
                .min_length(1)
                .max_length(200)
                .custom(no_html("Product name cannot contain HTML tags")),
        )
        .field(
            "sku",
            ValidationRule::new()
                .required()
                .pattern(&patterns::SKU)
                .max_length(50),
        )
        .field(
            "asin",
            ValidationRule::new().required().pattern(&patterns::ASIN),
        )
        .field(
            "price",
            ValidationRule::new()
                .required()
                .min(0.0)
                .max(999_999.99)
                .custom(numeric("Price must be a valid number")),
        )
        .field(
            "inventory",
            ValidationRule::new()
                .required()
                .min(0.0)
                .max(999_999.0)
                .custom(|value| {
                    let whole = sanitize_number(value).is_some_and(|n| n.fract() == 0.0);
                    (!whole).then(|| "Inventory must be a whole number".to_string())
                }),
        )
}

/// Advertising campaign form.
pub fn campaign() -> ValidationSchema {
    ValidationSchema::new()
        .field(
            "campaignName",
            ValidationRule::new()
                .required()
                .min_length(1)
                .max_length(100)
                .custom(no_html("Campaign name cannot contain HTML tags")),
        )
        .field(
            "budget",
            ValidationRule::new()
                .required()
                .min(1.0)
                .max(999_999.99)
                .custom(numeric("Budget must be a valid number")),
        )
        .field(
            "targetAcos",
            ValidationRule::new().min(0.0).max(100.0).custom(|value| {
                sanitize_percentage(value)
                    .is_some_and(|acos| !(0.0..=100.0).contains(&acos))
                    .then(|| "Target ACOS must be between 0% and 100%".to_string())
            }),
        )
}

/// User profile form.
pub fn user() -> ValidationSchema {
    ValidationSchema::new()
        .field(
            "email",
            ValidationRule::new()
                .required()
                .pattern(&patterns::EMAIL)
                .max_length(254),
        )
        .field(
            "firstName",
            ValidationRule::new()
                .required()
                .min_length(1)
                .max_length(50)
                .pattern(&patterns::PERSON_NAME),
        )
        .field(
            "lastName",
            ValidationRule::new()
                .required()
                .min_length(1)
                .max_length(50)
                .pattern(&patterns::PERSON_NAME),
        )
        .field(
            "phone",
            ValidationRule::new()
                .pattern(&patterns::PHONE)
                .max_length(20),
        )
}

/// Import settings form, judged against the local date.
pub fn csv_import() -> ValidationSchema {
    csv_import_at(Local::now().date_naive())
}

/// Import settings form with `today` as the latest allowed date.
pub fn csv_import_at(today: NaiveDate) -> ValidationSchema {
    ValidationSchema::new()
        .field(
            "timeFrame",
            ValidationRule::new().required().custom(|value| {
                let text = value.to_text();
                let known = TimeFrame::NAMES.iter().any(|name| *name == text);
                (!known).then(|| "Invalid time frame selected".to_string())
            }),
        )
        .field(
            "startDate",
            ValidationRule::new()
                .pattern(&patterns::DATE)
                .custom(move |value| {
                    is_after(value, today).then(|| "Start date cannot be in the future".to_string())
                }),
        )
        .field(
            "endDate",
            ValidationRule::new()
                .pattern(&patterns::DATE)
                .custom(move |value| {
                    is_after(value, today).then(|| "End date cannot be in the future".to_string())
                }),
        )
}

fn is_after(value: &FieldValue, today: NaiveDate) -> bool {
    let date = match value {
        FieldValue::Date(date) => Some(*date),
        other => NaiveDate::parse_from_str(&other.to_text(), "%Y-%m-%d").ok(),
    };
    date.is_some_and(|date| date > today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::validate_data;
    use seller_model::Record;

    fn valid_product() -> Record {
        Record::new()
            .with("name", "Ceramic Mug")
            .with("sku", "MUG-01")
            .with("asin", "B08XYZ1234")
            .with("price", "12.50")
            .with("inventory", "40")
    }

    #[test]
    fn test_product_valid() {
        let result = validate_data(&valid_product(), &product());
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn test_product_failures() {
        let record = valid_product()
            .with("name", "<b>Mug</b>")
            .with("sku", "mug-01")
            .with("inventory", "4.5");
        let result = validate_data(&record, &product());
        assert_eq!(result.errors["name"], "Product name cannot contain HTML tags");
        assert_eq!(result.errors["sku"], "sku format is invalid");
        assert_eq!(result.errors["inventory"], "Inventory must be a whole number");
        assert!(!result.errors.contains_key("price"));
    }

    #[test]
    fn test_non_numeric_price_fails_range_first() {
        let record = valid_product().with("price", "free");
        let result = validate_data(&record, &product());
        assert_eq!(result.errors["price"], "price must be at least 0");
    }

    #[test]
    fn test_campaign_budget_and_acos() {
        let record = Record::new()
            .with("campaignName", "Brand Defense")
            .with("budget", "0.5")
            .with("targetAcos", "0.25");
        let result = validate_data(&record, &campaign());
        assert_eq!(result.errors["budget"], "budget must be at least 1");
        assert!(!result.errors.contains_key("targetAcos"));
    }

    #[test]
    fn test_user_schema() {
        let record = Record::new()
            .with("email", "seller@example")
            .with("firstName", "Ana")
            .with("lastName", "Silva2");
        let result = validate_data(&record, &user());
        assert_eq!(result.errors["email"], "email format is invalid");
        assert_eq!(result.errors["lastName"], "lastName format is invalid");
        assert!(!result.errors.contains_key("phone"));
    }

    #[test]
    fn test_csv_import_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let schema = csv_import_at(today);

        let record = Record::new()
            .with("timeFrame", "custom")
            .with("startDate", "2024-05-01")
            .with("endDate", "2024-06-01");
        assert!(validate_data(&record, &schema).is_valid());

        let record = Record::new()
            .with("timeFrame", "fortnight")
            .with("startDate", "2024-06-02")
            .with("endDate", "06/01/2024");
        let result = validate_data(&record, &schema);
        assert_eq!(result.errors["timeFrame"], "Invalid time frame selected");
        assert_eq!(result.errors["startDate"], "Start date cannot be in the future");
        assert_eq!(result.errors["endDate"], "endDate format is invalid");
    }
}
