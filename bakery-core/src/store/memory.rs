use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::factory::{StoreConfig, StoreFactory};
use super::repository::{StoreError, TicketStore};

/// Process-local store. Clones share the same map, so a test can keep a
/// handle and inspect what a [`Ticket`](crate::Ticket) wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a value.
    pub fn contains(
        &self,
        key: &str,
    ) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Storage(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// [`StoreFactory`] for the `"memory"` backend. The connection string is
/// ignored; every call yields a fresh, empty store.
pub struct MemoryStoreFactory;

#[async_trait]
impl StoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &StoreConfig,
    ) -> Result<Box<dyn TicketStore>, StoreError> {
        Ok(Box::new(MemoryStore::new()))
    }
}
