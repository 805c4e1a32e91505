//! # API Route Modules
//!
//! Route modules for the registry surface:
//!
//! - `schemas` — schema registration, lookup, and paginated listing.
//! - `credential_definitions` — credential-definition registration (with
//!   referential-integrity check against the schema store) and lookup with
//!   the schema embedded.
//! - `admin` — bulk clear of the whole registry, the only delete path.

pub mod admin;
pub mod credential_definitions;
pub mod schemas;
