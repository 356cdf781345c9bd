//! Request-shape validation helpers.
//!
//! Presence and basic-type checks on body fields, run before the core is
//! invoked; the core re-validates domain ranges itself.

use domains::AppError;

use crate::error::ApiError;

pub(crate) fn required_string(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(field))
}

pub(crate) fn required_score(value: Option<i64>) -> Result<i64, ApiError> {
    value.ok_or_else(|| missing("score"))
}

pub(crate) fn required_like(value: Option<bool>) -> Result<bool, ApiError> {
    value.ok_or_else(|| missing("like"))
}

fn missing(field: &str) -> ApiError {
    ApiError(AppError::Validation(format!(
        "{field} must be provided in body"
    )))
}
