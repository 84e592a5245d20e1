use std::fmt;

use anyhow::{Context, Result};
use bakery_core::money::format_amount;
use bakery_core::store::MemoryStoreFactory;
use bakery_core::{
    Catalog, EntryState, IssuedAt, ReceiptHeader, RestoreOutcome, StoreConfig, StoreRegistry, Ticket,
    format_receipt,
};
use bakery_store_sqlite::SqliteStoreFactory;
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::print::{PrintSurface, print_receipt};

/// Registry with every backend this binary knows about.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(MemoryStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// Open the configured store and restore the ticket from it.
///
/// Only failing to open the store is an error; an unreadable ticket is
/// logged and replaced by an empty one.
pub async fn open_ticket(
    registry: &StoreRegistry,
    config: &StoreConfig,
) -> Result<Ticket> {
    debug!(backend = %config.backend, "opening ticket store");
    let store = registry
        .create(config)
        .await
        .with_context(|| format!("Failed to open '{}' store", config.backend))?;

    let (ticket, outcome) = Ticket::open(Catalog::bakery(), store).await;
    match &outcome {
        RestoreOutcome::Restored { lines } => debug!(lines, "restored ticket"),
        RestoreOutcome::Absent => debug!("no stored ticket"),
        RestoreOutcome::Corrupted { reason } => warn!(%reason, "stored ticket discarded"),
    }
    Ok(ticket)
}

/// es-ES date and time strings for a receipt.
pub fn issued_at(now: DateTime<Local>) -> IssuedAt {
    IssuedAt::new(
        now.format("%d/%m/%Y").to_string(),
        now.format("%H:%M:%S").to_string(),
    )
}

/// Map a user reference (index or name) to a product name. Names that are
/// not in the catalog pass through so restored lines can still be edited.
fn product_name(
    catalog: &Catalog,
    reference: &str,
) -> String {
    catalog
        .resolve(reference)
        .and_then(|i| catalog.get(i))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| reference.trim().to_string())
}

/// Select `reference`, set `quantity` and commit, as the storefront form does.
pub async fn add_product(
    ticket: &mut Ticket,
    reference: &str,
    quantity: u32,
) -> bool {
    let mut entry = EntryState::new();
    let index = ticket.catalog().resolve(reference);
    entry.select(ticket.catalog(), index);
    entry.set_quantity(quantity);
    debug!(reference, quantity, subtotal = %entry.subtotal(), "committing selection");
    entry.commit(ticket).await
}

pub async fn adjust_product(
    ticket: &mut Ticket,
    reference: &str,
    delta: i64,
) -> bool {
    let name = product_name(ticket.catalog(), reference);
    ticket.adjust_quantity(&name, delta).await
}

pub async fn remove_product(
    ticket: &mut Ticket,
    reference: &str,
) -> bool {
    let name = product_name(ticket.catalog(), reference);
    ticket.remove_line(&name).await
}

/// Ask `confirm` only when there is something to clear.
pub async fn clear_ticket(
    ticket: &mut Ticket,
    confirm: impl FnOnce() -> bool,
) -> bool {
    if !ticket.would_clear() {
        return false;
    }
    let confirmed = confirm();
    ticket.clear(confirmed).await
}

/// Render the receipt and hand it to `surface`. Nothing happens for an
/// empty ticket.
pub fn print_ticket(
    ticket: &Ticket,
    header: &ReceiptHeader,
    issued: &IssuedAt,
    surface: &dyn PrintSurface,
) -> bool {
    if ticket.is_empty() {
        return false;
    }
    let text = format_receipt(header, issued, &ticket.lines_view(), ticket.grand_total());
    let printed = print_receipt(surface, header, &text);
    if printed {
        info!(lines = ticket.ledger().len(), total = %ticket.grand_total(), "receipt printed");
    }
    printed
}

/// Catalog table for the `catalog` command.
pub struct CatalogListing<'a>(pub &'a Catalog);

impl fmt::Display for CatalogListing<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (i, product) in self.0.products().iter().enumerate() {
            writeln!(
                f,
                "{:>2}  {} {:<15} {:>6}€",
                i,
                product.glyph,
                product.name,
                format_amount(product.unit_price)
            )?;
        }
        Ok(())
    }
}

/// Current lines and total for the `show` command.
pub struct TicketSummary<'a>(pub &'a Ticket);

impl fmt::Display for TicketSummary<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let ticket = self.0;
        if ticket.is_empty() {
            return writeln!(f, "Ticket is empty");
        }
        for line in ticket.ledger().lines() {
            writeln!(
                f,
                "{} {:<15} {:>3} x {:>6}€ = {:>8}€",
                line.glyph,
                line.name,
                line.quantity,
                format_amount(line.unit_price),
                format_amount(line.total)
            )?;
        }
        writeln!(f, "TOTAL: {}€", format_amount(ticket.grand_total()))
    }
}
