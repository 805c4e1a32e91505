//! # Schema API
//!
//! Registration, lookup, and paginated listing of schema records. Lookup
//! misses are `null` responses, never 404 — callers distinguish "no such
//! schema" from transport failures by status code alone.

use acr_core::{registration_instant, NewSchema, SchemaRecord};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::db;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Pagination parameters. `page` is a zero-based page index, `take` a page
/// size defaulting to 10; the effective row skip is `page * take`.
/// Non-numeric values are rejected with a 400, never coerced.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub take: Option<u32>,
}

impl ListQuery {
    const DEFAULT_TAKE: u32 = 10;

    fn take(&self) -> i64 {
        i64::from(self.take.unwrap_or(Self::DEFAULT_TAKE))
    }

    fn skip(&self) -> i64 {
        // Saturate: `u32::MAX * u32::MAX` exceeds i64, and an astronomical
        // offset just yields an empty page.
        i64::from(self.page.unwrap_or(0)).saturating_mul(self.take())
    }
}

impl Validate for NewSchema {
    fn validate(&self) -> Result<(), String> {
        NewSchema::validate(self).map_err(|e| e.to_string())
    }
}

/// Build the schemas router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schemas", get(list_schemas).post(register_schema))
        .route("/schemas/:id", get(get_schema))
}

/// GET /schemas/:id — Look up a schema; `null` when absent.
#[utoipa::path(
    get,
    path = "/schemas/{id}",
    params(("id" = String, Path, description = "Schema identifier")),
    responses(
        (status = 200, description = "The schema, or JSON null when absent", body = SchemaRecord),
    ),
    tag = "schemas"
)]
pub(crate) async fn get_schema(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<SchemaRecord>>, AppError> {
    tracing::info!(%id, "getting schema");
    Ok(Json(db::schemas::get_by_id(&state.pool, &id).await?))
}

/// GET /schemas — List schemas in insertion order, page-wise.
#[utoipa::path(
    get,
    path = "/schemas",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of schemas in insertion order", body = [SchemaRecord]),
        (status = 400, description = "Non-numeric pagination parameter", body = crate::error::ErrorBody),
    ),
    tag = "schemas"
)]
pub(crate) async fn list_schemas(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<SchemaRecord>>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    tracing::info!(page = query.page, take = query.take, "listing schemas");
    let records = db::schemas::list(&state.pool, query.take(), query.skip()).await?;
    Ok(Json(records))
}

/// POST /schemas — Register a new schema.
#[utoipa::path(
    post,
    path = "/schemas",
    request_body = NewSchema,
    responses(
        (status = 200, description = "The stored schema record", body = SchemaRecord),
        (status = 400, description = "Validation failure", body = crate::error::ErrorBody),
    ),
    tag = "schemas"
)]
pub(crate) async fn register_schema(
    State(state): State<AppState>,
    body: Result<Json<NewSchema>, JsonRejection>,
) -> Result<Json<SchemaRecord>, AppError> {
    let input = extract_validated_json(body)?;
    tracing::info!(name = %input.name, version = %input.version, "registering schema");

    let record = input
        .into_record(registration_instant())
        .map_err(|e| AppError::Internal(format!("schema payload encode: {e}")))?;
    db::schemas::insert(&state.pool, &record).await?;

    Ok(Json(record))
}
