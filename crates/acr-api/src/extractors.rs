//! # Request Validation Helpers
//!
//! JSON bodies arrive as `Result<Json<T>, JsonRejection>` so that malformed
//! payloads become structured 400 responses instead of Axum's default
//! rejection, then pass through [`Validate`] before a handler touches them.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Shape validation for request payloads.
pub trait Validate {
    /// Check payload invariants, returning a caller-facing message on failure.
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON extraction result and run payload validation.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}
