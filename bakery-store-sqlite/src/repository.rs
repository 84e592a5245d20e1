use anyhow::{Context, Result};
use async_trait::async_trait;
use bakery_core::{StoreError, TicketStore};
use sqlx::{Row, sqlite::SqlitePool};
use tracing::debug;

/// [`TicketStore`] backed by a single `kv_store` table.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TicketStore for SqliteStore {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|e| StoreError::Storage(format!("Failed to get value for '{}': {}", key, e)))
        })
        .transpose()
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(())
    }
}
