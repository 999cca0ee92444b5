//! Shared normalization helpers for string request fields.

pub(super) use storereview_core::validate::normalize_optional;
use storereview_core::AppError;

/// Trim a required text field, rejecting empty values.
///
/// # Errors
/// Returns [`AppError::InvalidInput`] naming `field` when nothing remains after
/// trimming.
pub(super) fn require_text(value: String, field: &str) -> Result<String, AppError> {
    normalize_optional(Some(value))
        .ok_or_else(|| AppError::InvalidInput(format!("{} must not be empty", field)))
}
