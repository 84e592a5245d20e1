//! In-memory ticket ledger.
//!
//! Lines are kept in a `Vec` and looked up by product name, which keeps
//! iteration in insertion order. Every mutating method leaves the two
//! ledger invariants intact:
//!
//! * each line's `total == unit_price * quantity`, with `quantity >= 1`;
//! * `grand_total == Σ line.total`.
//!
//! The ledger does no I/O. Persistence is layered on top by
//! [`Ticket`](crate::Ticket).

use rust_decimal::Decimal;

use crate::models::{Product, TicketLine};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    lines: Vec<TicketLine>,
    grand_total: Decimal,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from already-ordered lines.
    ///
    /// Line totals and the grand total are recomputed; lines with a zero
    /// quantity are dropped.
    pub fn from_lines(lines: Vec<TicketLine>) -> Self {
        let mut ledger = Self {
            lines: lines
                .into_iter()
                .filter(|line| line.quantity > 0)
                .map(|mut line| {
                    line.recalculate();
                    line
                })
                .collect(),
            grand_total: Decimal::ZERO,
        };
        ledger.recalculate_total();
        ledger
    }

    /// Add `quantity` units of `product`, merging into an existing line.
    ///
    /// Returns `false` without touching the ledger when `quantity` is 0 or
    /// the merged quantity would not fit in a `u32`.
    pub fn add(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> bool {
        if quantity == 0 {
            return false;
        }

        match self.position(&product.name) {
            Some(index) => {
                let line = &mut self.lines[index];
                let Some(merged) = line.quantity.checked_add(quantity) else {
                    return false;
                };
                line.quantity = merged;
                line.recalculate();
            }
            None => self.lines.push(TicketLine::for_product(product, quantity)),
        }

        self.recalculate_total();
        true
    }

    /// Add `delta` to the quantity of the named line, removing it when the
    /// result drops to zero or below.
    ///
    /// Returns `false` when no such line exists or the new quantity would
    /// not fit in a `u32`.
    pub fn adjust(
        &mut self,
        name: &str,
        delta: i64,
    ) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };

        let Some(next) = i64::from(self.lines[index].quantity).checked_add(delta) else {
            return false;
        };
        if next <= 0 {
            self.lines.remove(index);
        } else {
            let Ok(quantity) = u32::try_from(next) else {
                return false;
            };
            let line = &mut self.lines[index];
            line.quantity = quantity;
            line.recalculate();
        }

        self.recalculate_total();
        true
    }

    /// Remove the named line. Returns `false` when it was not present.
    pub fn remove(
        &mut self,
        name: &str,
    ) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };
        self.lines.remove(index);
        self.recalculate_total();
        true
    }

    /// Drop every line and reset the grand total.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.grand_total = Decimal::ZERO;
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&TicketLine> {
        self.lines.iter().find(|line| line.name == name)
    }

    /// Borrow the lines in insertion order.
    pub fn lines(&self) -> &[TicketLine] {
        &self.lines
    }

    /// Owned copy of the lines in insertion order.
    pub fn lines_view(&self) -> Vec<TicketLine> {
        self.lines.clone()
    }

    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(
        &self,
        name: &str,
    ) -> Option<usize> {
        self.lines.iter().position(|line| line.name == name)
    }

    fn recalculate_total(&mut self) {
        self.grand_total = self.lines.iter().map(|line| line.total).sum();
    }
}
