use async_trait::async_trait;
use bakery_core::store::{StoreConfig, StoreError, StoreFactory, TicketStore};
use tracing::debug;

use crate::repository::SqliteStore;

/// Turn a connection string into a sqlx URL.
///
/// * `sqlite:...` URLs are used unchanged.
/// * `:memory:` becomes `sqlite::memory:`.
/// * A bare path becomes `sqlite:<path>?mode=rwc` so the file is created
///   when missing.
fn connection_url(connection_string: &str) -> String {
    let trimmed = connection_string.trim();
    if trimmed.starts_with("sqlite:") {
        trimmed.to_string()
    } else if trimmed == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite:{trimmed}?mode=rwc")
    }
}

/// [`StoreFactory`] for SQLite.
///
/// ```rust,no_run
/// use bakery_core::StoreRegistry;
/// use bakery_store_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database and bring its schema up to date.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn TicketStore>, StoreError> {
        let url = connection_url(&config.connection_string);
        debug!(url = %url, "opening sqlite store");

        let store = SqliteStore::new(&url)
            .await
            .map_err(|e| StoreError::Connection(format!("{e:#}")))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Storage(format!("{e:#}")))?;
        Ok(Box::new(store))
    }
}
