//! Field-level validation shared by the entity input types.
//!
//! Every check here runs before any database access, so a rejected input
//! never leaves a partial write behind.

use crate::errors::CoreError;

/// Maximum length of an animal description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Require a text field to be non-empty after trimming surrounding whitespace.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming the field when it is blank.
pub fn require_text(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Check an optional description against [`DESCRIPTION_MAX_CHARS`].
///
/// # Errors
///
/// Returns `CoreError::Validation` when the description is too long.
pub fn check_description(description: Option<&str>) -> Result<(), CoreError> {
    if let Some(text) = description {
        let len = text.chars().count();
        if len > DESCRIPTION_MAX_CHARS {
            return Err(CoreError::Validation(format!(
                "description is {len} characters, maximum is {DESCRIPTION_MAX_CHARS}"
            )));
        }
    }
    Ok(())
}

/// Convert a signed age (as typed by a user) into the stored `u32` form.
///
/// # Errors
///
/// Returns `CoreError::Validation` for negative values or values above `u32::MAX`.
pub fn age_from_i64(value: i64, field: &str) -> Result<u32, CoreError> {
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| CoreError::Validation(format!("{field} is out of range: {value}")))
}
