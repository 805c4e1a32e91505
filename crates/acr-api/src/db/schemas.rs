//! Schema persistence operations.
//!
//! All functions take an executor (pool or open transaction) and operate on
//! the `anoncreds_schemas` table. Insertion order is the `rowid` order.

use acr_core::{RegistryId, SchemaRecord};
use chrono::{DateTime, Utc};
use sqlx::Sqlite;

use super::DbError;

/// Insert a new schema record.
pub async fn insert<'e, E>(executor: E, record: &SchemaRecord) -> Result<(), DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let attributes = serde_json::to_string(&record.attributes)
        .map_err(|e| DbError::Corrupt(format!("attributes encode: {e}")))?;

    sqlx::query(
        "INSERT INTO anoncreds_schemas (id, name, version, attributes, issuer_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(record.id.as_str())
    .bind(&record.name)
    .bind(&record.version)
    .bind(attributes)
    .bind(&record.issuer_id)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// Fetch a schema by id. Absence is `Ok(None)`, not an error.
pub async fn get_by_id<'e, E>(executor: E, id: &str) -> Result<Option<SchemaRecord>, DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, SchemaRow>(
        "SELECT id, name, version, attributes, issuer_id, created_at, updated_at
         FROM anoncreds_schemas WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    row.map(SchemaRow::into_record).transpose()
}

/// List schemas in insertion order.
///
/// `skip` is the pre-computed effective offset (`page * take`).
pub async fn list<'e, E>(executor: E, take: i64, skip: i64) -> Result<Vec<SchemaRecord>, DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, SchemaRow>(
        "SELECT id, name, version, attributes, issuer_id, created_at, updated_at
         FROM anoncreds_schemas ORDER BY rowid LIMIT ?1 OFFSET ?2",
    )
    .bind(take)
    .bind(skip)
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(SchemaRow::into_record).collect()
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
pub(crate) struct SchemaRow {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) attributes: String,
    pub(crate) issuer_id: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl SchemaRow {
    pub(crate) fn into_record(self) -> Result<SchemaRecord, DbError> {
        let id = RegistryId::parse(self.id).map_err(|e| DbError::Corrupt(e.to_string()))?;
        let attributes = serde_json::from_str(&self.attributes)
            .map_err(|e| DbError::Corrupt(format!("attributes decode: {e}")))?;
        Ok(SchemaRecord {
            id,
            name: self.name,
            version: self.version,
            attributes,
            issuer_id: self.issuer_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
