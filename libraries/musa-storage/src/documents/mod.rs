//! SQLite-backed documents
//!
//! Each row of the `documents` table is one key of one named document, with
//! its value stored as JSON text.

use async_trait::async_trait;
use musa_core::DocumentStore;
use sqlx::SqlitePool;

use crate::error::{Result, StorageError};

/// One named document in a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    document: String,
}

impl SqliteDocumentStore {
    /// Address `document` in the given pool
    ///
    /// Nothing is read until the first `get`.
    pub fn new(pool: SqlitePool, document: impl Into<String>) -> Self {
        Self {
            pool,
            document: document.into(),
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get a value, decoding the stored JSON
    pub async fn get_value(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM documents WHERE document = ? AND key = ?")
                .bind(&self.document)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((raw,)) => {
                let value = serde_json::from_str(&raw)
                    .map_err(|e| StorageError::SerializationError(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Upsert a value as JSON text
    pub async fn set_value(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO documents (document, key, value, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(document, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(&self.document)
        .bind(key)
        .bind(raw)
        .bind(now)
        .execute(&self.pool)
        .await?;

        tracing::debug!(document = %self.document, key, "Document key written");
        Ok(())
    }

    /// Keys present in this document, sorted
    pub async fn keys(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT key FROM documents WHERE document = ? ORDER BY key")
                .bind(&self.document)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(key,)| key).collect())
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get(&self, key: &str) -> musa_core::Result<Option<serde_json::Value>> {
        Ok(self.get_value(key).await?)
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> musa_core::Result<()> {
        Ok(self.set_value(key, &value).await?)
    }
}
