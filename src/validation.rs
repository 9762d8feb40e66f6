//! Payload validation.
//!
//! Malformed input is expected to be rejected by the HTTP layer before it
//! reaches the store, but the store re-checks on every write path so that a
//! bad payload can never corrupt state. Implement [`Validatable`] on payload
//! models and collect failures into [`ValidationErrors`].

use serde::Serialize;
use std::fmt;

/// A single validation failure with the offending field and a message.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
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

/// Collection of validation failures for one payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Convert to a `Result`, erroring when any failure was recorded.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when the collection is non-empty.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Trait for payload models that can be validated before hitting the store.
pub trait Validatable {
    /// Validate the instance.
    ///
    /// # Errors
    ///
    /// Returns every failure found, not just the first.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Field-level validators shared by the payload models.
pub mod validators {
    use super::ValidationError;

    /// Validate string length is within the given bounds (inclusive).
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the field when out of bounds.
    pub fn validate_length(
        field: &str,
        value: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Result<(), ValidationError> {
        let len = value.chars().count();

        if let Some(min_len) = min {
            if len < min_len {
                return Err(ValidationError::new(
                    field,
                    format!("Must be at least {min_len} characters"),
                ));
            }
        }

        if let Some(max_len) = max {
            if len > max_len {
                return Err(ValidationError::new(
                    field,
                    format!("Must be at most {max_len} characters"),
                ));
            }
        }

        Ok(())
    }

    /// Validate the value is not empty or whitespace-only.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the field when blank.
    pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(field, "This field is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_creation() {
        let err = ValidationError::new("name", "Too short");
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "Too short");
    }

    #[test]
    fn test_validation_errors_collection() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add(ValidationError::new("name", "error1"));
        errors.add(ValidationError::new("species", "error2"));
        assert_eq!(errors.errors().len(), 2);
        assert!(errors.result().is_err());
    }

    #[test]
    fn test_empty_collection_is_ok() {
        assert!(ValidationErrors::new().result().is_ok());
    }

    #[test]
    fn test_validate_length() {
        use validators::validate_length;

        assert!(validate_length("name", "a", Some(2), Some(50)).is_err());
        assert!(validate_length("name", &"x".repeat(51), Some(2), Some(50)).is_err());
        assert!(validate_length("name", "Max", Some(2), Some(50)).is_ok());
    }

    #[test]
    fn test_validate_required() {
        use validators::validate_required;

        assert!(validate_required("species", "").is_err());
        assert!(validate_required("species", "   ").is_err());
        assert!(validate_required("species", "Dog").is_ok());
    }
}
