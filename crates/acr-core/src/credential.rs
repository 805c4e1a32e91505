//! # Credential-Definition Records
//!
//! A credential definition binds issuer-specific public key material to
//! exactly one schema. The `value` payload is an opacity boundary: the
//! registry stores and returns it verbatim and never validates its shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationError;
use crate::ident::RegistryId;
use crate::schema::SchemaRecord;

/// A published, immutable credential definition with its schema embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDefinitionRecord {
    /// Derived `urn:` identifier, globally unique.
    pub id: RegistryId,
    /// The schema this definition was registered against, resolved at
    /// creation time. Schemas cannot be deleted individually, so this
    /// reference cannot dangle.
    pub schema: SchemaRecord,
    /// Disambiguates multiple definitions over the same schema/issuer pair.
    pub tag: String,
    pub issuer_id: String,
    /// Name of the signature scheme (e.g. `CL`); opaque to the registry.
    #[serde(rename = "type")]
    pub signature_type: String,
    /// Public key material, stored and returned verbatim.
    pub value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload for a new credential definition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCredentialDefinition {
    /// Identifier of an already-registered schema.
    pub schema_id: RegistryId,
    pub tag: String,
    pub issuer_id: String,
    #[serde(rename = "type")]
    pub signature_type: String,
    pub value: serde_json::Value,
}

impl NewCredentialDefinition {
    /// Check the payload invariants. `value` is deliberately not inspected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tag.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "tag" });
        }
        if self.issuer_id.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "issuerId" });
        }
        if self.signature_type.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "type" });
        }
        Ok(())
    }

    /// Materialize the stored record against the resolved schema, deriving
    /// the identifier from this payload and the registration instant.
    pub fn into_record(
        self,
        schema: SchemaRecord,
        registered_at: DateTime<Utc>,
    ) -> Result<CredentialDefinitionRecord, serde_json::Error> {
        let id = RegistryId::derive(&self, registered_at)?;
        Ok(CredentialDefinitionRecord {
            id,
            schema,
            tag: self.tag,
            issuer_id: self.issuer_id,
            signature_type: self.signature_type,
            value: self.value,
            created_at: registered_at,
            updated_at: registered_at,
        })
    }
}
