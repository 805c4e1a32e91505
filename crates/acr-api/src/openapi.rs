//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the registry surface.
///
/// Registers all utoipa-documented routes, schemas, and tags. Serves as the
/// single source of truth for integrators.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AnonCreds Metadata Registry API",
        version = "0.2.1",
        description = "Storage and lookup service for AnonCreds schema and credential-definition metadata.\n\nProvides:\n- **Schema registration** with deterministically derived `urn:` identifiers\n- **Credential-definition registration** bound to an existing schema (referential integrity enforced at creation)\n- **Paginated listing** of schemas in insertion order\n- **Bulk clear** of the whole registry — the only delete path; individual records are immutable and permanent\n\nLookup misses return JSON `null` with status 200; error responses carry a flat `{\"error\": \"...\"}` body.",
        license(name = "Apache-2.0")
    ),
    servers(
        (url = "http://localhost:3554", description = "Local development server"),
    ),
    paths(
        // ── Schemas ─────────────────────────────────────────────────────
        crate::routes::schemas::register_schema,
        crate::routes::schemas::get_schema,
        crate::routes::schemas::list_schemas,
        // ── Credential Definitions ──────────────────────────────────────
        crate::routes::credential_definitions::register_credential_definition,
        crate::routes::credential_definitions::get_credential_definition,
        // ── Maintenance ─────────────────────────────────────────────────
        crate::routes::admin::clear_registry,
    ),
    components(
        schemas(
            acr_core::RegistryId,
            acr_core::SchemaRecord,
            acr_core::NewSchema,
            acr_core::CredentialDefinitionRecord,
            acr_core::NewCredentialDefinition,
            crate::routes::admin::ClearResponse,
            crate::error::ErrorBody,
        ),
    ),
    tags(
        (name = "schemas", description = "Schema registration, lookup, and paginated listing"),
        (name = "credentialDefinitions", description = "Credential-definition registration and lookup with embedded schema"),
        (name = "admin", description = "Registry maintenance — bulk clear across both stores"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
