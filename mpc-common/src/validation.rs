//! Payload validation for admin writes
//!
//! Each check appends a [`FieldError`]; callers reject the payload when the
//! returned list is non-empty.

use serde::{Deserialize, Serialize};

/// Single field validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Types that can check themselves before being written
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;
}

/// Push a "required" error when `value` is blank
pub(crate) fn require(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "Required"));
    }
}

/// Push a slug error when `value` is present but not slug-shaped
pub(crate) fn require_slug(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "Required"));
    } else if !crate::slug::is_valid_slug(value) {
        errors.push(FieldError::new(
            field,
            "Must contain only lowercase letters, digits and single dashes",
        ));
    }
}
