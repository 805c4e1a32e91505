//! # Validation Errors
//!
//! Field-level validation failures raised when a registration payload or a
//! stored identifier is malformed. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// A registration payload or identifier failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required string field was empty or whitespace-only.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Wire name of the offending field.
        field: &'static str,
    },

    /// A schema registration carried no attribute names.
    #[error("attrNames must contain at least one attribute name")]
    NoAttributes,

    /// An attribute name within `attrNames` was empty.
    #[error("attribute name at position {index} must not be empty")]
    EmptyAttributeName {
        /// Zero-based position within `attrNames`.
        index: usize,
    },

    /// The same attribute name appeared more than once in one schema.
    #[error("duplicate attribute name: {name}")]
    DuplicateAttributeName {
        /// The repeated attribute name.
        name: String,
    },

    /// An identifier did not carry the `urn:` scheme marker.
    #[error("registry identifier must be urn-shaped, got: {0}")]
    MalformedId(String),
}
