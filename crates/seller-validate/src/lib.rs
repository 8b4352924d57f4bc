//! Field and form validation.
//!
//! A [`ValidationSchema`] maps field names to [`ValidationRule`]s.
//! [`validate_field`] checks one value and returns the first failure message;
//! [`validate_data`] sanitizes a whole record and collects one message per
//! failing field. [`FormState`] keeps the values, errors and submission state
//! of one form.
//!
//! # Example
//!
//! ```ignore
//! use seller_model::Record;
//! use seller_validate::{schemas, validate_data};
//!
//! let record = Record::new().with("sku", "mug 01");
//! let result = validate_data(&record, &schemas::product());
//! assert_eq!(result.errors["sku"], "sku format is invalid");
//! ```

mod data;
mod form;
pub mod patterns;
mod rule;
pub mod schemas;

pub use data::{DataValidation, validate_data};
pub use form::FormState;
pub use rule::{CustomCheck, ValidationRule, ValidationSchema, validate_field};
