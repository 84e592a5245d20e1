use std::collections::HashMap;

use async_trait::async_trait;

use super::repository::{StoreError, TicketStore};

/// Backend-agnostic store configuration.
///
/// `backend` must match the [`StoreFactory::backend_name`] of a registered
/// factory. `connection_string` is passed through to that factory unchanged.
///
/// | backend  | connection_string examples                  |
/// |----------|---------------------------------------------|
/// | `memory` | ignored                                     |
/// | `sqlite` | `sqlite:ticket.db?mode=rwc`, `sqlite::memory:` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"sqlite"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            connection_string: String::new(),
        }
    }
}

/// One implementation per storage backend, registered with a
/// [`StoreRegistry`] at startup.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Open (or create) the store. Implementations may run migrations here.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn TicketStore>, StoreError>;
}

/// Registry of [`StoreFactory`] instances, keyed by backend name.
pub struct StoreRegistry {
    factories: HashMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any previous factory with the
    /// same name.
    pub fn register(
        &mut self,
        factory: Box<dyn StoreFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory matching `config.backend`, ignoring case and
    /// surrounding whitespace (`--backend SQLite` opens `sqlite`).
    ///
    /// # Errors
    /// * [`StoreError::Configuration`] when no factory is registered for the
    ///   requested backend.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn TicketStore>, StoreError> {
        let wanted = config.backend.trim().to_ascii_lowercase();
        let factory = self
            .factories
            .get(wanted.as_str())
            .ok_or_else(|| {
                StoreError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::{StoreConfig, StoreError, StoreFactory, StoreRegistry, TicketStore};
    use crate::store::MemoryStore;

    // ── stub factory ─────────────────────────────────────────────────────
    /// Flips an `AtomicBool` on `create` so tests can prove dispatch.
    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl StoreFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn TicketStore>, StoreError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(MemoryStore::new()))
        }
    }

    struct FailingFactory;

    #[async_trait]
    impl StoreFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn TicketStore>, StoreError> {
            Err(StoreError::Connection("intentional failure".to_string()))
        }
    }

    fn stub_factory(name: &'static str) -> (Box<dyn StoreFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFactory {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    fn config(backend: &str) -> StoreConfig {
        StoreConfig {
            backend: backend.to_string(),
            connection_string: "x".to_string(),
        }
    }

    // ── StoreConfig ──────────────────────────────────────────────────────
    #[test]
    fn store_config_default_is_memory() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.backend, "memory");
        assert!(cfg.connection_string.is_empty());
    }

    // ── registration ─────────────────────────────────────────────────────
    #[test]
    fn new_registry_has_no_backends() {
        assert!(StoreRegistry::new().available_backends().is_empty());
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut reg = StoreRegistry::new();
        // Registered in reverse alphabetical order on purpose.
        let (f1, _) = stub_factory("sqlite");
        let (f2, _) = stub_factory("memory");
        reg.register(f1);
        reg.register(f2);
        assert_eq!(reg.available_backends(), vec!["memory", "sqlite"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = StoreRegistry::new();
        let (old, _) = stub_factory("sqlite");
        let (new, _) = stub_factory("sqlite");
        reg.register(old);
        reg.register(new);
        assert_eq!(reg.available_backends(), vec!["sqlite"]);
    }

    // ── dispatch ─────────────────────────────────────────────────────────
    #[tokio::test]
    async fn create_calls_matching_factory_only() {
        let mut reg = StoreRegistry::new();
        let (sqlite, sqlite_called) = stub_factory("sqlite");
        let (memory, memory_called) = stub_factory("memory");
        reg.register(sqlite);
        reg.register(memory);

        let result = reg.create(&config("sqlite")).await;

        assert!(result.is_ok(), "expected Ok, got {:#?}", result.err());
        assert!(sqlite_called.load(Ordering::SeqCst));
        assert!(!memory_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn backend_name_is_matched_case_insensitively() {
        let mut reg = StoreRegistry::new();
        let (sqlite, sqlite_called) = stub_factory("sqlite");
        reg.register(sqlite);

        let result = reg.create(&config(" SQLite ")).await;

        assert!(result.is_ok(), "expected Ok, got {:#?}", result.err());
        assert!(sqlite_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_backend_names_requested_and_available() {
        let mut reg = StoreRegistry::new();
        let (f, _) = stub_factory("sqlite");
        reg.register(f);

        match reg.create(&config("postgres")).await {
            Err(StoreError::Configuration(msg)) => {
                assert!(msg.contains("postgres"), "error should name the requested backend");
                assert!(msg.contains("sqlite"), "error should list available backends");
            }
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a store"),
        }
    }

    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut reg = StoreRegistry::new();
        reg.register(Box::new(FailingFactory));

        let result = reg.create(&config("failing")).await;

        assert_eq!(
            result.err(),
            Some(StoreError::Connection("intentional failure".to_string()))
        );
    }
}
