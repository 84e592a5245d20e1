//! Integration tests running the ticket against a real SQLite store.

use std::path::PathBuf;

use bakery_core::{Catalog, RestoreOutcome, StoreConfig, StoreRegistry, TICKET_STORAGE_KEY, Ticket, TicketStore};
use bakery_store_sqlite::{SqliteStore, SqliteStoreFactory};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sqlx::sqlite::SqlitePoolOptions;

async fn setup_test_db() -> SqliteStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    let store = SqliteStore::new_with_pool(pool).await;
    store
        .run_migrations()
        .await
        .expect("Failed to run migrations");
    store
}

/// A database file unique to this test run, removed on drop.
struct TempDb(PathBuf);

impl TempDb {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("bakery-{}-{}.db", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        Self(path)
    }

    fn config(&self) -> StoreConfig {
        StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: self.0.display().to_string(),
        }
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

#[tokio::test]
async fn test_ticket_writes_json_pairs() {
    let store = setup_test_db().await;
    let pool = store.pool().clone();
    let mut ticket = Ticket::new(Catalog::bakery(), Box::new(store));

    ticket.add_line("Chapata", 2).await;
    ticket.add_line("Croissant", 1).await;

    let reader = SqliteStore::new_with_pool(pool).await;
    let raw = reader
        .get(TICKET_STORAGE_KEY)
        .await
        .expect("Should read")
        .expect("Ticket should be stored");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("Stored value should be JSON");

    assert_eq!(value[0][0], "Chapata");
    assert_eq!(value[0][1]["quantity"], 2);
    assert_eq!(value[1][0], "Croissant");
}

#[tokio::test]
async fn test_confirmed_clear_deletes_row() {
    let store = setup_test_db().await;
    let pool = store.pool().clone();
    let mut ticket = Ticket::new(Catalog::bakery(), Box::new(store));
    ticket.add_line("Magdalena", 1).await;

    ticket.clear(true).await;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store WHERE key = ?")
        .bind(TICKET_STORAGE_KEY)
        .fetch_one(&pool)
        .await
        .expect("Should count rows");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_ticket_survives_reopening_database_file() {
    let db = TempDb::new("reopen");

    {
        let store = registry().create(&db.config()).await.expect("Should open store");
        let mut ticket = Ticket::new(Catalog::bakery(), store);
        ticket.add_line("Pan Integral", 3).await;
        ticket.add_line("Baguette", 2).await;
        ticket.adjust_quantity("Pan Integral", -1).await;
    }

    let store = registry().create(&db.config()).await.expect("Should reopen store");
    let (ticket, outcome) = Ticket::open(Catalog::bakery(), store).await;

    assert_eq!(outcome, RestoreOutcome::Restored { lines: 2 });
    let names: Vec<_> = ticket.lines_view().into_iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["Pan Integral", "Baguette"]);
    assert_eq!(ticket.grand_total(), dec!(2.70));
}

#[tokio::test]
async fn test_corrupted_row_restores_empty() {
    let store = setup_test_db().await;
    store
        .set(TICKET_STORAGE_KEY, "[[\"Chapata\", 42]]")
        .await
        .expect("Should set value");

    let (ticket, outcome) = Ticket::open(Catalog::bakery(), Box::new(store)).await;

    assert!(matches!(outcome, RestoreOutcome::Corrupted { .. }));
    assert!(ticket.is_empty());
}
