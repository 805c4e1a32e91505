//! # Registry Maintenance API
//!
//! The bulk clear — the registry's only delete operation. Published metadata
//! is otherwise permanent: per-record deletes would invalidate credentials
//! already issued against it.

use axum::extract::State;
use axum::routing::delete;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;
use crate::error::AppError;
use crate::state::AppState;

/// Acknowledgement body for the bulk clear.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClearResponse {
    pub success: bool,
}

/// Build the maintenance router.
pub fn router() -> Router<AppState> {
    Router::new().route("/all", delete(clear_registry))
}

/// DELETE /all — Clear both stores in one transaction.
#[utoipa::path(
    delete,
    path = "/all",
    responses(
        (status = 200, description = "Both stores cleared", body = ClearResponse),
    ),
    tag = "admin"
)]
pub(crate) async fn clear_registry(
    State(state): State<AppState>,
) -> Result<Json<ClearResponse>, AppError> {
    tracing::info!("clearing registry");
    db::clear_all(&state.pool).await?;
    Ok(Json(ClearResponse { success: true }))
}
