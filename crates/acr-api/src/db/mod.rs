//! # Database Persistence Layer
//!
//! SQLite persistence for the registry via SQLx. The pool is built by
//! [`init_pool`] with an explicit lifecycle and handed down through
//! `AppState` — there is no process-lifetime connection singleton.
//!
//! ## What is persisted
//!
//! - `anoncreds_schemas` — published schema records.
//! - `anoncreds_credential_definitions` — credential definitions, FK to
//!   their schema. Attribute lists and key material are JSON text columns.
//!
//! Records are write-once. The only delete path is [`clear_all`], which
//! empties both tables inside a single transaction so a concurrent create
//! can never observe one table cleared and the other not.

pub mod credential_definitions;
pub mod schemas;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use thiserror::Error;

/// Errors surfaced by the persistence layer.
#[derive(Error, Debug)]
pub enum DbError {
    /// The underlying driver failed.
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    /// A stored row could not be decoded back into a domain record.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// A credential-definition insert referenced a schema that does not
    /// exist (checked inside the insert transaction).
    #[error("schema not found: {0}")]
    SchemaNotFound(String),
}

/// Initialize the connection pool and run embedded migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(database_url)
        .await?;

    tracing::info!(url = database_url, "connected to SQLite");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    Ok(pool)
}

/// Remove every schema and every credential definition.
///
/// Both deletes run in one transaction: either the whole registry is
/// cleared or nothing is.
pub async fn clear_all(pool: &SqlitePool) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM anoncreds_credential_definitions")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM anoncreds_schemas")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}
