//! Validation utilities.

use crate::{FieldError, NewsdeskError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `NewsdeskError::InvalidInput` with
    /// the given message on failure.
    fn validate_request(&self, message: &str) -> Result<(), NewsdeskError> {
        self.validate().map_err(|e| NewsdeskError::InvalidInput {
            message: message.to_string(),
            errors: field_errors(&e),
        })
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors, sorted by field
/// name so responses are stable.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// Strips angle brackets and surrounding whitespace from user input.
#[must_use]
pub fn sanitize(value: &str) -> String {
    value.replace(['<', '>'], "").trim().to_string()
}

/// Request types whose string fields are cleaned with [`sanitize`] before
/// validation.
pub trait Sanitize: Sized {
    /// Returns a copy with every string field sanitized.
    #[must_use]
    fn sanitized(self) -> Self;
}

/// Sanitizes an optional field, dropping values that end up empty.
#[must_use]
pub fn sanitize_opt(value: Option<String>) -> Option<String> {
    value.map(|v| sanitize(&v)).filter(|v| !v.is_empty())
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a category is one of the known categories.
    pub fn known_category(value: &str) -> Result<(), ValidationError> {
        if !crate::is_valid_category(value) {
            let mut error = ValidationError::new("invalid_category");
            error.message = Some("Invalid category".into());
            return Err(error);
        }
        Ok(())
    }
}
