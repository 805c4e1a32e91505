//! Credential-definition persistence operations.
//!
//! Creation resolves the referenced schema and inserts in one transaction,
//! so a concurrent [`clear_all`](super::clear_all) cannot interleave between
//! the lookup and the insert. Reads join the schema row so callers get the
//! embedded schema without a second round trip.

use acr_core::{
    registration_instant, CredentialDefinitionRecord, NewCredentialDefinition, RegistryId,
};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use sqlx::Sqlite;

use super::schemas;
use super::DbError;

/// Resolve the schema and persist a new credential definition atomically.
///
/// Fails with [`DbError::SchemaNotFound`] — persisting nothing — when the
/// referenced schema is absent.
pub async fn create(
    pool: &SqlitePool,
    input: NewCredentialDefinition,
) -> Result<CredentialDefinitionRecord, DbError> {
    let mut tx = pool.begin().await?;

    let schema = schemas::get_by_id(&mut *tx, input.schema_id.as_str())
        .await?
        .ok_or_else(|| DbError::SchemaNotFound(input.schema_id.to_string()))?;

    let record = input
        .into_record(schema, registration_instant())
        .map_err(|e| DbError::Corrupt(format!("payload encode: {e}")))?;

    insert(&mut *tx, &record).await?;
    tx.commit().await?;

    Ok(record)
}

/// Insert an already-materialized record.
async fn insert<'e, E>(executor: E, record: &CredentialDefinitionRecord) -> Result<(), DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let value = serde_json::to_string(&record.value)
        .map_err(|e| DbError::Corrupt(format!("value encode: {e}")))?;

    sqlx::query(
        "INSERT INTO anoncreds_credential_definitions
         (id, schema_id, tag, issuer_id, signature_type, value, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(record.id.as_str())
    .bind(record.schema.id.as_str())
    .bind(&record.tag)
    .bind(&record.issuer_id)
    .bind(&record.signature_type)
    .bind(value)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// Fetch a credential definition by id, with its schema joined in.
/// Absence is `Ok(None)`, not an error.
pub async fn get_by_id(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<CredentialDefinitionRecord>, DbError> {
    let row = sqlx::query_as::<_, CredentialDefinitionRow>(
        "SELECT d.id, d.tag, d.issuer_id, d.signature_type, d.value,
                d.created_at, d.updated_at,
                s.id AS schema_id, s.name AS schema_name, s.version AS schema_version,
                s.attributes AS schema_attributes, s.issuer_id AS schema_issuer_id,
                s.created_at AS schema_created_at, s.updated_at AS schema_updated_at
         FROM anoncreds_credential_definitions d
         JOIN anoncreds_schemas s ON s.id = d.schema_id
         WHERE d.id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(CredentialDefinitionRow::into_record).transpose()
}

/// Internal row type for SQLx mapping, flattening the schema join.
#[derive(sqlx::FromRow)]
struct CredentialDefinitionRow {
    id: String,
    tag: String,
    issuer_id: String,
    signature_type: String,
    value: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    schema_id: String,
    schema_name: String,
    schema_version: String,
    schema_attributes: String,
    schema_issuer_id: String,
    schema_created_at: DateTime<Utc>,
    schema_updated_at: DateTime<Utc>,
}

impl CredentialDefinitionRow {
    fn into_record(self) -> Result<CredentialDefinitionRecord, DbError> {
        let schema = schemas::SchemaRow {
            id: self.schema_id,
            name: self.schema_name,
            version: self.schema_version,
            attributes: self.schema_attributes,
            issuer_id: self.schema_issuer_id,
            created_at: self.schema_created_at,
            updated_at: self.schema_updated_at,
        }
        .into_record()?;

        let id = RegistryId::parse(self.id).map_err(|e| DbError::Corrupt(e.to_string()))?;
        let value = serde_json::from_str(&self.value)
            .map_err(|e| DbError::Corrupt(format!("value decode: {e}")))?;

        Ok(CredentialDefinitionRecord {
            id,
            schema,
            tag: self.tag,
            issuer_id: self.issuer_id,
            signature_type: self.signature_type,
            value,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
