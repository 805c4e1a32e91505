//! # acr-api — Axum HTTP Service for the AnonCreds Metadata Registry
//!
//! Thin orchestration over the two stores: request validation, identifier
//! derivation via `acr-core`, persistence through SQLx, and error mapping at
//! the boundary.
//!
//! ## API Surface
//!
//! | Method | Path                        | Module                            |
//! |--------|-----------------------------|-----------------------------------|
//! | GET    | `/schemas/:id`              | [`routes::schemas`]               |
//! | GET    | `/schemas?page=&take=`      | [`routes::schemas`]               |
//! | POST   | `/schemas`                  | [`routes::schemas`]               |
//! | GET    | `/credentialDefinition/:id` | [`routes::credential_definitions`]|
//! | POST   | `/credentialDefinition`     | [`routes::credential_definitions`]|
//! | DELETE | `/all`                      | [`routes::admin`]                 |
//!
//! Health probes (`/health/*`) and `/openapi.json` sit alongside the
//! registry routes; the whole surface is unauthenticated and CORS-open,
//! matching the deployment this service fronts.

pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Body size limit: 2 MiB. Credential-definition key material is the
/// largest expected payload and stays well under that.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::schemas::router())
        .merge(routes::credential_definitions::router())
        .merge(routes::admin::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api).with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the database connection is healthy.
///
/// Returns 200 "ready" or 503 with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = sqlx::query("SELECT 1").execute(&state.pool).await {
        tracing::warn!("database health check failed: {e}");
        return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}
