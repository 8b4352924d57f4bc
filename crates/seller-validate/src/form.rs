//! Form state: values, per-field errors and submission.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};

use seller_common::{ErrorReport, ReporterHandle};
use seller_model::{FieldValue, ReportCategory, Record, Severity};
use seller_transform::{TransformationSchema, transform_record};

use crate::data::validate_data;
use crate::rule::{ValidationSchema, validate_field};

const COMPONENT: &str = "form";

/// State of one form bound to a validation schema.
///
/// Failures are reported through the injected [`ReporterHandle`]: a failed
/// form validation as a validation report, a failed submission as a
/// high-severity API report.
pub struct FormState {
    schema: ValidationSchema,
    transformation: Option<TransformationSchema>,
    reporter: ReporterHandle,
    form_data: Record,
    errors: BTreeMap<String, String>,
    is_valid: bool,
    is_submitting: bool,
    submit_error: Option<String>,
}

impl FormState {
    pub fn new(schema: ValidationSchema, reporter: ReporterHandle) -> Self {
        Self {
            schema,
            transformation: None,
            reporter,
            form_data: Record::new(),
            errors: BTreeMap::new(),
            is_valid: false,
            is_submitting: false,
            submit_error: None,
        }
    }

    /// Transforms validated data with `schema` before it is submitted.
    #[must_use]
    pub fn with_transformation(mut self, schema: TransformationSchema) -> Self {
        self.transformation = Some(schema);
        self
    }

    /// Sets a value and clears that field's error.
    pub fn update_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.form_data.insert(name, value);
        self.errors.remove(name);
    }

    /// Validates one field. Fields outside the schema are ignored.
    pub fn validate_field(&mut self, name: &str) -> Option<&str> {
        let rule = self.schema.get(name)?;
        match validate_field(&self.form_data.value(name), rule, name) {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
        self.error(name)
    }

    /// Validates every field, replacing the error map.
    pub fn validate_form(&mut self) -> bool {
        let result = validate_data(&self.form_data, &self.schema);
        self.is_valid = result.is_valid();
        self.errors = result.errors;

        if !self.is_valid {
            debug!(errors = self.errors.len(), "form validation failed");
            self.reporter.report(ErrorReport::validation(
                "Form validation failed",
                "formValidation",
                COMPONENT,
            ));
        }
        self.is_valid
    }

    /// Validates, transforms if configured, and hands the data to `on_submit`.
    ///
    /// Without a transformation schema the sanitized form data is submitted.
    /// A transformation or submit failure is kept as [`submit_error`] and
    /// reported. Returns true when `on_submit` succeeded.
    ///
    /// [`submit_error`]: FormState::submit_error
    pub fn submit<F, E>(&mut self, on_submit: F) -> bool
    where
        F: FnOnce(Record) -> Result<(), E>,
        E: fmt::Display,
    {
        if self.is_submitting {
            return false;
        }
        self.is_submitting = true;
        self.submit_error = None;

        let outcome = self.run_submit(on_submit);
        self.is_submitting = false;

        match outcome {
            Ok(submitted) => {
                if submitted {
                    info!("form submitted");
                    self.errors.clear();
                }
                submitted
            }
            Err(message) => {
                self.reporter.report(
                    ErrorReport::new(message.clone(), Severity::High, ReportCategory::Api)
                        .with_component(COMPONENT)
                        .with_action("submitForm"),
                );
                self.submit_error = Some(message);
                false
            }
        }
    }

    fn run_submit<F, E>(&mut self, on_submit: F) -> Result<bool, String>
    where
        F: FnOnce(Record) -> Result<(), E>,
        E: fmt::Display,
    {
        if !self.validate_form() {
            return Ok(false);
        }

        let data = match &self.transformation {
            Some(schema) => transform_record(&self.form_data, schema).map_err(|e| e.to_string())?,
            None => validate_data(&self.form_data, &self.schema).sanitized_data,
        };

        on_submit(data).map_err(|e| e.to_string())?;
        Ok(true)
    }

    /// Clears values, errors and submission state.
    pub fn reset(&mut self) {
        self.form_data = Record::new();
        self.errors.clear();
        self.is_valid = false;
        self.submit_error = None;
    }

    /// Replaces all values and clears errors.
    pub fn set_form_data(&mut self, data: Record) {
        self.form_data = data;
        self.errors.clear();
        self.submit_error = None;
    }

    pub fn form_data(&self) -> &Record {
        &self.form_data
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("fields", &self.schema.len())
            .field("form_data", &self.form_data)
            .field("errors", &self.errors)
            .field("is_valid", &self.is_valid)
            .field("submit_error", &self.submit_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas;
    use seller_common::{ErrorReporter, ReportSink, SinkError};

    #[derive(Default)]
    struct Collect(Vec<ErrorReport>);

    impl ReportSink for Collect {
        fn deliver(&mut self, batch: &[ErrorReport]) -> Result<(), SinkError> {
            self.0.extend_from_slice(batch);
            Ok(())
        }
    }

    fn filled_product(form: &mut FormState) {
        form.update_field("name", "Ceramic Mug");
        form.update_field("sku", "MUG-01");
        form.update_field("asin", "B08XYZ1234");
        form.update_field("price", "$12.50");
        form.update_field("inventory", "40");
    }

    #[test]
    fn update_clears_field_error() {
        let (_reporter, handle) = ErrorReporter::new(Collect::default());
        let mut form = FormState::new(schemas::product(), handle);
        form.update_field("sku", "bad sku");
        assert_eq!(form.validate_field("sku"), Some("sku format is invalid"));
        form.update_field("sku", "MUG-01");
        assert_eq!(form.error("sku"), None);
        assert_eq!(form.validate_field("unknown"), None);
    }

    #[test]
    fn invalid_form_is_reported() {
        let (mut reporter, handle) = ErrorReporter::new(Collect::default());
        let mut form = FormState::new(schemas::product(), handle);
        assert!(!form.validate_form());
        assert_eq!(form.errors().len(), 5);

        reporter.pump();
        let report = &reporter.sink().0[0];
        assert_eq!(report.message, "Form validation failed");
        assert_eq!(report.context.action.as_deref(), Some("validation:formValidation"));
    }

    #[test]
    fn submit_transforms_data() {
        let (_reporter, handle) = ErrorReporter::new(Collect::default());
        let mut form = FormState::new(schemas::product(), handle)
            .with_transformation(seller_transform::schemas::product());
        filled_product(&mut form);

        let mut submitted = None;
        let ok = form.submit(|data| {
            submitted = Some(data);
            Ok::<_, String>(())
        });
        assert!(ok);
        let data = submitted.unwrap();
        assert_eq!(data.number("price"), Some(12.5));
        assert_eq!(data.value("category"), FieldValue::from("Uncategorized"));
        assert!(form.submit_error().is_none());
    }

    #[test]
    fn failed_submit_keeps_error() {
        let (mut reporter, handle) = ErrorReporter::new(Collect::default());
        let mut form = FormState::new(schemas::product(), handle);
        filled_product(&mut form);

        let ok = form.submit(|_| Err("service unavailable"));
        assert!(!ok);
        assert_eq!(form.submit_error(), Some("service unavailable"));
        assert!(!form.is_submitting());

        reporter.pump();
        let report = &reporter.sink().0[0];
        assert_eq!(report.severity, Severity::High);
        assert_eq!(report.category, ReportCategory::Api);
    }

    #[test]
    fn reset_and_set_form_data() {
        let (_reporter, handle) = ErrorReporter::new(Collect::default());
        let mut form = FormState::new(schemas::user(), handle);
        form.validate_form();
        assert!(!form.errors().is_empty());

        form.set_form_data(Record::new().with("email", "a@b.co"));
        assert!(form.errors().is_empty());
        assert_eq!(form.form_data().value("email"), FieldValue::from("a@b.co"));

        form.reset();
        assert!(form.form_data().is_empty());
        assert!(!form.is_valid());
    }
}
