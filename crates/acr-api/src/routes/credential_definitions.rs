//! # Credential-Definition API
//!
//! Registration and lookup of credential definitions. Registration resolves
//! the referenced schema inside the insert transaction; an unknown schema is
//! the structured `400 {"error":"Schema not found"}` response. Lookups embed
//! the schema so callers resolve it without a second call.

use acr_core::{CredentialDefinitionRecord, NewCredentialDefinition};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

impl Validate for NewCredentialDefinition {
    fn validate(&self) -> Result<(), String> {
        NewCredentialDefinition::validate(self).map_err(|e| e.to_string())
    }
}

/// Build the credential-definitions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/credentialDefinition", post(register_credential_definition))
        .route("/credentialDefinition/:id", get(get_credential_definition))
}

/// GET /credentialDefinition/:id — Look up a definition; `null` when absent.
#[utoipa::path(
    get,
    path = "/credentialDefinition/{id}",
    params(("id" = String, Path, description = "Credential-definition identifier")),
    responses(
        (status = 200, description = "The definition with its schema embedded, or JSON null when absent", body = CredentialDefinitionRecord),
    ),
    tag = "credentialDefinitions"
)]
pub(crate) async fn get_credential_definition(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<CredentialDefinitionRecord>>, AppError> {
    tracing::info!(%id, "getting credential definition");
    Ok(Json(
        db::credential_definitions::get_by_id(&state.pool, &id).await?,
    ))
}

/// POST /credentialDefinition — Register a new credential definition.
#[utoipa::path(
    post,
    path = "/credentialDefinition",
    request_body = NewCredentialDefinition,
    responses(
        (status = 200, description = "The stored record with its schema embedded", body = CredentialDefinitionRecord),
        (status = 400, description = "Unknown schema or validation failure", body = crate::error::ErrorBody),
    ),
    tag = "credentialDefinitions"
)]
pub(crate) async fn register_credential_definition(
    State(state): State<AppState>,
    body: Result<Json<NewCredentialDefinition>, JsonRejection>,
) -> Result<Json<CredentialDefinitionRecord>, AppError> {
    let input = extract_validated_json(body)?;
    tracing::info!(
        schema_id = %input.schema_id,
        tag = %input.tag,
        "registering credential definition"
    );

    let record = db::credential_definitions::create(&state.pool, input).await?;
    Ok(Json(record))
}
