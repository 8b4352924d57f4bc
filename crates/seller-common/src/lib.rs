//! Shared utilities for the seller import crates.
//!
//! - [`sanitize`]: strips active content and control characters from text
//! - [`numeric`]: coerces decorated text (`$1,200`, `18%`) into numbers
//! - [`reporter`]: error reporter injected into components that surface failures

pub mod numeric;
pub mod reporter;
pub mod sanitize;

pub use numeric::{parse_number_prefix, sanitize_currency, sanitize_number, sanitize_percentage};
pub use reporter::{
    ErrorContext, ErrorReport, ErrorReporter, ReportSink, ReporterHandle, SinkError, TracingSink,
};
pub use sanitize::{sanitize_input, sanitize_value, strip_control_chars};
