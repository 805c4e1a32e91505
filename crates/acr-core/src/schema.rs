//! # Schema Records
//!
//! A schema is a named, versioned list of attribute names an issuer commits
//! to including in credentials of that type. Once published it is immutable;
//! the only way it leaves the registry is the bulk clear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationError;
use crate::ident::RegistryId;

/// A published, immutable schema definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRecord {
    /// Derived `urn:` identifier, globally unique.
    pub id: RegistryId,
    pub name: String,
    /// Free-form versioning token; not semver-validated.
    pub version: String,
    /// Ordered attribute names, unique within the schema.
    pub attributes: Vec<String>,
    /// External identifier of the issuing authority; opaque to the registry.
    pub issuer_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload for a new schema, as received on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSchema {
    pub name: String,
    pub version: String,
    pub attr_names: Vec<String>,
    pub issuer_id: String,
}

impl NewSchema {
    /// Check the payload invariants: non-empty strings and a non-empty list
    /// of non-empty, pairwise-distinct attribute names.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        if self.version.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "version" });
        }
        if self.issuer_id.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "issuerId" });
        }
        if self.attr_names.is_empty() {
            return Err(ValidationError::NoAttributes);
        }
        for (index, attr) in self.attr_names.iter().enumerate() {
            if attr.trim().is_empty() {
                return Err(ValidationError::EmptyAttributeName { index });
            }
        }
        for (index, attr) in self.attr_names.iter().enumerate() {
            if self.attr_names[..index].contains(attr) {
                return Err(ValidationError::DuplicateAttributeName {
                    name: attr.clone(),
                });
            }
        }
        Ok(())
    }

    /// Materialize the stored record, deriving the identifier from this
    /// payload and the registration instant.
    pub fn into_record(self, registered_at: DateTime<Utc>) -> Result<SchemaRecord, serde_json::Error> {
        let id = RegistryId::derive(&self, registered_at)?;
        Ok(SchemaRecord {
            id,
            name: self.name,
            version: self.version,
            attributes: self.attr_names,
            issuer_id: self.issuer_id,
            created_at: registered_at,
            updated_at: registered_at,
        })
    }
}
