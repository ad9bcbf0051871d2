// ABOUTME: SQLite-backed option store
// ABOUTME: One row per named option, value serialized as JSON text

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::options::{check_name, OptionStore, StoredOption};
use crate::{StorageError, StorageResult};

pub struct SqliteOptionStore {
    pool: SqlitePool,
}

impl SqliteOptionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url` and make sure the options table exists.
    /// In-memory databases get a single connection so every query sees the
    /// same database.
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            5
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.initialize().await?;
        info!("Opened option store at {}", database_url);
        Ok(store)
    }

    pub async fn initialize(&self) -> StorageResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS options (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                revision INTEGER NOT NULL DEFAULT 1,
                updated_at TEXT NOT NULL DEFAULT (datetime('now', 'utc'))
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn current_revision(&self, name: &str) -> StorageResult<i64> {
        let revision: Option<i64> =
            sqlx::query_scalar("SELECT revision FROM options WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        Ok(revision.unwrap_or(0))
    }

    /// Helper to convert row to StoredOption
    fn row_to_option(&self, row: SqliteRow) -> StorageResult<StoredOption> {
        let raw: String = row.try_get("value").map_err(StorageError::Sqlx)?;
        Ok(StoredOption {
            name: row.try_get("name").map_err(StorageError::Sqlx)?,
            value: serde_json::from_str(&raw)?,
            revision: row.try_get("revision").map_err(StorageError::Sqlx)?,
            updated_at: row.try_get("updated_at").map_err(StorageError::Sqlx)?,
        })
    }
}

#[async_trait]
impl OptionStore for SqliteOptionStore {
    async fn get_option(&self, name: &str) -> StorageResult<Option<StoredOption>> {
        let row = sqlx::query("SELECT name, value, revision, updated_at FROM options WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        row.map(|row| self.row_to_option(row)).transpose()
    }

    async fn set_option(&self, name: &str, value: &Value) -> StorageResult<StoredOption> {
        check_name(name)?;
        let encoded = serde_json::to_string(value)?;

        let row = sqlx::query(
            r#"
            INSERT INTO options (name, value, revision, updated_at)
            VALUES (?, ?, 1, datetime('now', 'utc'))
            ON CONFLICT(name) DO UPDATE SET
                value = excluded.value,
                revision = options.revision + 1,
                updated_at = datetime('now', 'utc')
            RETURNING name, value, revision, updated_at
            "#,
        )
        .bind(name)
        .bind(&encoded)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let stored = self.row_to_option(row)?;
        debug!("Stored option {} at revision {}", name, stored.revision);
        Ok(stored)
    }

    async fn set_option_if_revision(
        &self,
        name: &str,
        value: &Value,
        expected_revision: i64,
    ) -> StorageResult<StoredOption> {
        check_name(name)?;
        let encoded = serde_json::to_string(value)?;

        // Single conditional statement per case so the check and the write
        // cannot interleave with another writer.
        let row = if expected_revision == 0 {
            sqlx::query(
                r#"
                INSERT INTO options (name, value, revision, updated_at)
                VALUES (?, ?, 1, datetime('now', 'utc'))
                ON CONFLICT(name) DO NOTHING
                RETURNING name, value, revision, updated_at
                "#,
            )
            .bind(name)
            .bind(&encoded)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
        } else {
            sqlx::query(
                r#"
                UPDATE options
                SET value = ?, revision = revision + 1, updated_at = datetime('now', 'utc')
                WHERE name = ? AND revision = ?
                RETURNING name, value, revision, updated_at
                "#,
            )
            .bind(&encoded)
            .bind(name)
            .bind(expected_revision)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
        };

        match row {
            Some(row) => self.row_to_option(row),
            None => Err(StorageError::Conflict {
                name: name.to_string(),
                expected: expected_revision,
                actual: self.current_revision(name).await?,
            }),
        }
    }

    async fn delete_option(&self, name: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM options WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}
