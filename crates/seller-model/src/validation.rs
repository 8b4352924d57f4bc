//! Validation result shared by the file and content validation stages.

use serde::Serialize;

/// Outcome of a validation stage.
///
/// Errors block the import; warnings are surfaced but do not. The result is
/// immutable once built: stages combine results with [`ValidationResult::merge`]
/// instead of editing one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    /// Builds a result; validity is derived from the error list.
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// A passing result with no findings.
    pub fn valid() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// A failing result with a single error.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::new(vec![error.into()], Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Concatenates two results, keeping the order of findings.
    #[must_use]
    pub fn merge(self, other: ValidationResult) -> Self {
        let mut errors = self.errors;
        errors.extend(other.errors);
        let mut warnings = self.warnings;
        warnings.extend(other.warnings);
        Self::new(errors, warnings)
    }

    /// Splits the result into its error and warning lists.
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.errors, self.warnings)
    }
}
