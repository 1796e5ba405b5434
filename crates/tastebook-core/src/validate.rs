//! Structural validation for incoming payloads.
//!
//! Validation only checks shape and ranges. Whether a referenced restaurant exists is
//! checked separately by the service before a handler runs.

/// A payload that can check its own structure.
pub trait Validate {
    /// Check the payload, returning the first problem found.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` describing the first invalid field.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error for `field`.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Require a string field to contain something other than whitespace.
///
/// # Errors
///
/// Returns an error naming `field` when `value` is blank.
pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{field} is required")));
    }
    Ok(())
}

/// Require a number to be finite and within `min..=max`.
///
/// # Errors
///
/// Returns an error naming `field` when `value` falls outside the range.
pub fn require_in_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("{field} must be between {min} and {max}"),
        ));
    }
    Ok(())
}
