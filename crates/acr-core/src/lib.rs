//! # acr-core — Domain Types for the AnonCreds Metadata Registry
//!
//! This crate defines the registry's domain model: published schemas,
//! credential definitions bound to them, and the deterministic `urn:`
//! identifier derivation both record types share. The HTTP service crate
//! (`acr-api`) depends on this crate; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifier.** [`RegistryId`] is a validated newtype — no bare
//!    strings for record identifiers. The only constructors are
//!    [`RegistryId::derive`] (name-based UUID under a fixed namespace) and
//!    [`RegistryId::parse`] (validates the `urn:` shape).
//!
//! 2. **Immutable records.** [`SchemaRecord`] and
//!    [`CredentialDefinitionRecord`] are created once and never updated;
//!    the registry exposes no per-record mutation.
//!
//! 3. **Opaque credential-definition payloads.** The `value` field on a
//!    credential definition is stored and returned verbatim as JSON. The
//!    registry never interprets the key material it carries.
//!
//! ## Crate Policy
//!
//! - No dependencies on other registry crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` with the wire field names (camelCase).

pub mod credential;
pub mod error;
pub mod ident;
pub mod schema;

// Re-export primary types for ergonomic imports.
pub use credential::{CredentialDefinitionRecord, NewCredentialDefinition};
pub use error::ValidationError;
pub use ident::{registration_instant, RegistryId, REGISTRY_ID_NAMESPACE};
pub use schema::{NewSchema, SchemaRecord};
