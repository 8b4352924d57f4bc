//! Schema and rule types.

use std::fmt;
use std::sync::Arc;

use seller_model::FieldValue;

/// Target type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Number,
    Currency,
    Percentage,
    Date,
    Boolean,
    Array,
}

/// Custom step applied to a present value before coercion.
pub type ValueTransform = Arc<dyn Fn(FieldValue) -> FieldValue + Send + Sync>;

/// How one field is produced.
#[derive(Clone)]
pub struct TransformRule {
    pub field_type: FieldType,
    pub required: bool,
    /// Substituted for a missing optional value. `None` leaves the field `Null`.
    pub default_value: Option<FieldValue>,
    pub transform: Option<ValueTransform>,
}

impl TransformRule {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: false,
            default_value: None,
            transform: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(FieldValue) -> FieldValue + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }
}

impl fmt::Debug for TransformRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRule")
            .field("field_type", &self.field_type)
            .field("required", &self.required)
            .field("default_value", &self.default_value)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Ordered field rules. Output records follow this order.
#[derive(Debug, Clone, Default)]
pub struct TransformationSchema {
    fields: Vec<(String, TransformRule)>,
}

impl TransformationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing an existing rule of the same name in place.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rule: TransformRule) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = rule,
            None => self.fields.push((name, rule)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&TransformRule> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TransformRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Names of required fields, in order.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, rule)| rule.required)
            .map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
