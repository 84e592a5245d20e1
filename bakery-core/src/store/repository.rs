use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Durable string key-value store the ticket persists itself into.
///
/// Keys that were never written, or were removed, read back as `None`.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite `key`.
    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError>;
}
