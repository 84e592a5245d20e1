pub mod catalog;
pub mod entry;
pub mod ledger;
pub mod models;
pub mod money;
pub mod receipt;
pub mod snapshot;
pub mod store;
pub mod ticket;

pub use catalog::{Catalog, CatalogError};
pub use entry::EntryState;
pub use ledger::Ledger;
pub use models::*;
pub use receipt::{IssuedAt, ReceiptHeader, format_receipt, render_print_document};
pub use store::{StoreConfig, StoreError, StoreRegistry, TicketStore};
pub use ticket::{RestoreOutcome, TICKET_STORAGE_KEY, Ticket};
