use serde_json::Value;
use std::fmt;

use crate::attributes::{Attribute, AttributeStore};
use crate::error::PaymentError;
use crate::transaction::TransactionSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for PaymentError {
    fn from(err: ValidationError) -> Self {
        PaymentError::MissingParameter(err.field.to_string())
    }
}

pub type ValidationResult = Result<(), ValidationError>;

/// Whether a value counts as supplied. `false` and `0` do.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => true,
    }
}

pub fn validate_required(store: &AttributeStore, attr: Attribute) -> ValidationResult {
    if !is_present(store.get(attr)) {
        return Err(ValidationError::new(attr.name(), "must not be empty"));
    }

    Ok(())
}

/// Checks the schema's fixed required list in order, then the attributes
/// that only become required for a given channel. Stops at the first gap.
pub fn validate(store: &AttributeStore, schema: &TransactionSchema) -> ValidationResult {
    for attr in schema.required {
        validate_required(store, *attr)?;
    }

    let channel = store
        .get(Attribute::Channel)
        .and_then(Value::as_str)
        .map(str::trim);

    for (required_on, attr) in schema.channel_requirements {
        if channel.is_some_and(|c| c.eq_ignore_ascii_case(required_on)) {
            validate_required(store, *attr)?;
        }
    }

    Ok(())
}
