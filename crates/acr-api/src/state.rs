//! # Application State
//!
//! Explicitly constructed context passed down to every handler: the service
//! configuration and the database pool. No process-lifetime singletons — the
//! pool is opened in `main` (or a test harness) and owned by this struct.

use sqlx::sqlite::SqlitePool;

/// Service configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to listen on (`PORT`, default 3554).
    pub port: u16,
    /// SQLx database URL (`DATABASE_URL`, default on-disk SQLite).
    pub database_url: String,
}

impl AppConfig {
    /// Read configuration from environment variables, falling back to the
    /// defaults the original deployment used.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(3554);
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:registry.sqlite?mode=rwc".to_string());
        Self { port, database_url }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub pool: SqlitePool,
}

impl AppState {
    /// Assemble the state from an already-opened pool.
    pub fn new(config: AppConfig, pool: SqlitePool) -> Self {
        Self { config, pool }
    }
}
