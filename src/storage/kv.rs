use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use super::MIGRATION_001_INITIAL;

/// Durable string-keyed store of JSON documents, backed by a single SQLite
/// table. Each ledger collection lives under one fixed key and is rewritten
/// whole on every mutation.
#[derive(Clone)]
pub struct KvStore {
    pool: SqlitePool,
}

impl KvStore {
    /// Create a new store over an existing SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new store (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let store = Self::connect(database_url).await?;
        store.migrate().await?;
        Ok(store)
    }

    /// Get the document stored under `key`, or `None` if the key was never
    /// written.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_records WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to read key '{key}'"))?;

        Ok(row.map(|r| r.get("value")))
    }

    /// Durably overwrite the document under `key`.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_records (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to write key '{key}'"))?;
        Ok(())
    }

    /// Overwrite several keys atomically. Either every document lands or
    /// none does, so a multi-key ledger update can never be observed half
    /// written.
    pub async fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin write transaction")?;

        for (key, value) in entries {
            sqlx::query(
                r#"
                INSERT INTO kv_records (key, value) VALUES (?, ?)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to write key '{key}'"))?;
        }

        tx.commit()
            .await
            .context("Failed to commit write transaction")?;
        Ok(())
    }
}
