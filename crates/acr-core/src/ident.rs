//! # Registry Identifier Derivation
//!
//! Every published record is keyed by a `urn:`-prefixed, name-based (v5)
//! UUID derived from the registration payload and the registration instant.
//!
//! ## Derivation
//!
//! The payload is serialized to JSON in declaration order, the millisecond
//! timestamp is appended, and the resulting string is hashed into a v5 UUID
//! under the fixed [`REGISTRY_ID_NAMESPACE`]. The function is pure: the same
//! payload registered at the same millisecond derives the same identifier,
//! while any difference in content or instant derives a different one.
//!
//! Two registrations of identical content within the same millisecond would
//! collide. The storage layer treats that collision as an input failure via
//! the primary-key uniqueness constraint — it never overwrites.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::{uuid, Uuid};

use crate::error::ValidationError;

/// Fixed namespace under which all registry identifiers are derived.
pub const REGISTRY_ID_NAMESPACE: Uuid = uuid!("1b671a64-40d5-491e-99b0-da01ff1f3341");

/// The current instant truncated to millisecond resolution — the
/// granularity identifier derivation operates at.
pub fn registration_instant() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// A `urn:`-prefixed registry identifier.
///
/// Valid by construction: [`RegistryId::derive`] always produces the urn
/// shape, and [`RegistryId::parse`] rejects anything else — including at
/// deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct RegistryId(String);

impl RegistryId {
    /// Derive the identifier for a registration payload received at
    /// `registered_at`.
    ///
    /// Serialization of the payload cannot realistically fail for the
    /// registry's record types; the error is propagated rather than
    /// panicked on.
    pub fn derive<T: Serialize>(
        payload: &T,
        registered_at: DateTime<Utc>,
    ) -> Result<Self, serde_json::Error> {
        let canonical = serde_json::to_string(payload)?;
        let name = format!("{canonical}{}", registered_at.timestamp_millis());
        let hash = Uuid::new_v5(&REGISTRY_ID_NAMESPACE, name.as_bytes());
        Ok(Self(format!("urn:{hash}")))
    }

    /// Accept an externally supplied identifier, validating the urn shape.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        match raw.strip_prefix("urn:") {
            Some(rest) if !rest.is_empty() => Ok(Self(raw)),
            _ => Err(ValidationError::MalformedId(raw)),
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deserializes as a plain `String`, then routes through [`RegistryId::parse`]
/// so that invalid identifiers are rejected at deserialization time — not
/// silently accepted.
impl<'de> Deserialize<'de> for RegistryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}
