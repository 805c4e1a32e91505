//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failing endpoint returns the flat `{"error": "<message>"}` body the
//! registry's wire contract mandates. Storage errors are logged with their
//! operation context and never leak driver details to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::db::DbError;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Credential-definition registration referenced an unknown schema (400).
    /// The message is part of the wire contract.
    #[error("Schema not found")]
    SchemaNotFound,

    /// Request validation failed (400).
    #[error("validation error: {0}")]
    Validation(String),

    /// Underlying storage failed (500). Message is logged but not returned
    /// to the client.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal invariant broke (500). Message is logged but not returned
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::SchemaNotFound | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Never expose storage/internal error messages to clients.
        let message = match &self {
            Self::Storage(_) | Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Map persistence-layer errors to API errors.
///
/// A primary-key uniqueness violation means two registrations of identical
/// content landed in the same millisecond; per the identifier-derivation
/// contract that is an input failure, never an overwrite.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::SchemaNotFound(_) => Self::SchemaNotFound,
            DbError::Sqlx(e) if is_unique_violation(&e) => Self::Validation(
                "identifier collision: identical payload registered twice within one millisecond"
                    .to_string(),
            ),
            other => Self::Storage(other.to_string()),
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
