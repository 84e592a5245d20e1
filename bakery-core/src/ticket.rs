//! The running ticket: a [`Ledger`] bound to the [`Catalog`] and a durable
//! [`TicketStore`].
//!
//! Every successful mutation is followed by a persist. Storage failures are
//! logged and swallowed; the in-memory ledger stays authoritative.

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::ledger::Ledger;
use crate::models::TicketLine;
use crate::snapshot::{decode_lines, encode_lines};
use crate::store::TicketStore;

/// Storage key the ticket is persisted under.
pub const TICKET_STORAGE_KEY: &str = "panaderia_ticket";

/// What [`Ticket::restore`] found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// A valid record was loaded.
    Restored { lines: usize },
    /// Nothing was stored; the ticket is empty.
    Absent,
    /// The record (or the read itself) was unusable; the ticket was reset.
    Corrupted { reason: String },
}

pub struct Ticket {
    catalog: Catalog,
    ledger: Ledger,
    store: Box<dyn TicketStore>,
}

impl Ticket {
    /// An empty ticket. Nothing is read from `store` until [`restore`](Self::restore).
    pub fn new(
        catalog: Catalog,
        store: Box<dyn TicketStore>,
    ) -> Self {
        Self {
            catalog,
            ledger: Ledger::new(),
            store,
        }
    }

    /// Build a ticket and restore it from `store`.
    pub async fn open(
        catalog: Catalog,
        store: Box<dyn TicketStore>,
    ) -> (Self, RestoreOutcome) {
        let mut ticket = Self::new(catalog, store);
        let outcome = ticket.restore().await;
        (ticket, outcome)
    }

    /// Add `quantity` units of the named catalog product.
    ///
    /// Unknown products and a zero quantity are ignored; returns whether the
    /// ticket changed.
    pub async fn add_line(
        &mut self,
        product_name: &str,
        quantity: u32,
    ) -> bool {
        let Some(product) = self.catalog.find(product_name) else {
            debug!(product = product_name, "ignoring add for unknown product");
            return false;
        };
        if !self.ledger.add(product, quantity) {
            debug!(product = product_name, quantity, "ignoring add with zero or overflowing quantity");
            return false;
        }

        debug!(product = product_name, quantity, total = %self.ledger.grand_total(), "line added");
        self.persist().await;
        true
    }

    /// Change a line's quantity by `delta`; the line is removed when the
    /// quantity drops to zero or below.
    pub async fn adjust_quantity(
        &mut self,
        product_name: &str,
        delta: i64,
    ) -> bool {
        if !self.ledger.adjust(product_name, delta) {
            return false;
        }

        debug!(product = product_name, delta, total = %self.ledger.grand_total(), "line adjusted");
        self.persist().await;
        true
    }

    pub async fn remove_line(
        &mut self,
        product_name: &str,
    ) -> bool {
        if !self.ledger.remove(product_name) {
            return false;
        }

        debug!(product = product_name, total = %self.ledger.grand_total(), "line removed");
        self.persist().await;
        true
    }

    /// Whether [`clear`](Self::clear) would do anything, i.e. whether the
    /// caller should ask for confirmation at all.
    pub fn would_clear(&self) -> bool {
        !self.ledger.is_empty()
    }

    /// Empty the ticket and delete the stored record.
    ///
    /// Does nothing unless `confirmed` is true and the ticket has lines.
    pub async fn clear(
        &mut self,
        confirmed: bool,
    ) -> bool {
        if !confirmed || !self.would_clear() {
            return false;
        }

        self.ledger.clear();
        if let Err(e) = self.store.remove(TICKET_STORAGE_KEY).await {
            error!(error = %e, "failed to delete stored ticket");
        }
        info!("ticket cleared");
        true
    }

    /// Snapshot of the lines in insertion order.
    pub fn lines_view(&self) -> Vec<TicketLine> {
        self.ledger.lines_view()
    }

    pub fn grand_total(&self) -> Decimal {
        self.ledger.grand_total()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Write the current lines to the store. Failures are logged only.
    pub async fn persist(&self) {
        let raw = match encode_lines(self.ledger.lines()) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "failed to encode ticket");
                return;
            }
        };

        if let Err(e) = self.store.set(TICKET_STORAGE_KEY, &raw).await {
            error!(error = %e, "failed to persist ticket");
        }
    }

    /// Replace the in-memory ledger with the stored record.
    ///
    /// Line totals and the grand total are recomputed from prices and
    /// quantities. Any failure leaves the ticket empty.
    pub async fn restore(&mut self) -> RestoreOutcome {
        let raw = match self.store.get(TICKET_STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.ledger = Ledger::new();
                return RestoreOutcome::Absent;
            }
            Err(e) => {
                error!(error = %e, "failed to read stored ticket");
                self.ledger = Ledger::new();
                return RestoreOutcome::Corrupted {
                    reason: e.to_string(),
                };
            }
        };

        match decode_lines(&raw) {
            Ok(lines) => {
                self.ledger = Ledger::from_lines(lines);
                debug!(lines = self.ledger.len(), total = %self.ledger.grand_total(), "ticket restored");
                RestoreOutcome::Restored {
                    lines: self.ledger.len(),
                }
            }
            Err(e) => {
                warn!(error = %e, "discarding unreadable stored ticket");
                self.ledger = Ledger::new();
                RestoreOutcome::Corrupted {
                    reason: e.to_string(),
                }
            }
        }
    }
}
