//! Schema-driven record transformation.
//!
//! A [`TransformationSchema`] lists fields in order, each with a target
//! [`FieldType`], a required flag, an optional default and an optional
//! custom step. [`transform_record`] walks the schema, fills defaults, runs
//! the custom step and coerces the value:
//!
//! | Type | Result |
//! |------|--------|
//! | `String` | sanitized text |
//! | `Number` | longest numeric prefix, or `Null` |
//! | `Currency` | number after dropping `$`, `,` and whitespace |
//! | `Percentage` | number with unit inference (`18%`, `0.18`, `18` all give 18) |
//! | `Date` | calendar date, or `Null` |
//! | `Boolean` | `true`/`1`/`yes`/`on` and non-zero numbers are true |
//! | `Array` | comma-split, sanitized, empties dropped |
//!
//! Coercion never fails: unparseable input becomes `Null`. Only a missing
//! required field is an error.

mod coerce;
mod error;
pub mod schemas;
mod transform;
mod types;

pub use coerce::{coerce, parse_date, to_array, to_boolean};
pub use error::{Result, TransformError};
pub use transform::{transform_batch, transform_record, transform_rows, verify_transformed};
pub use types::{FieldType, TransformRule, TransformationSchema, ValueTransform};
