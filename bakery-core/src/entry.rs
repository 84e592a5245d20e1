//! Product/quantity selection before it is committed to the ticket.
//!
//! This state is never persisted.

use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::ticket::Ticket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryState {
    selected: Option<usize>,
    quantity: u32,
    unit_price: Decimal,
    subtotal: Decimal,
}

impl Default for EntryState {
    fn default() -> Self {
        Self {
            selected: None,
            quantity: 1,
            unit_price: Decimal::ZERO,
            subtotal: Decimal::ZERO,
        }
    }
}

impl EntryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a product by catalog index. The quantity goes back to 1.
    /// `None` or an out-of-range index clears the selection.
    pub fn select(
        &mut self,
        catalog: &Catalog,
        index: Option<usize>,
    ) {
        match index.and_then(|i| catalog.get(i).map(|p| (i, p))) {
            Some((i, product)) => {
                self.selected = Some(i);
                self.unit_price = product.unit_price;
                self.quantity = 1;
            }
            None => {
                self.selected = None;
                self.unit_price = Decimal::ZERO;
            }
        }
        self.recalculate();
    }

    /// Set the quantity directly. Zero is accepted but cannot be committed.
    pub fn set_quantity(
        &mut self,
        quantity: u32,
    ) {
        self.quantity = quantity;
        self.recalculate();
    }

    /// Step the quantity by `delta`, never going below 1.
    pub fn change_quantity(
        &mut self,
        delta: i64,
    ) {
        let next = i64::from(self.quantity).saturating_add(delta).max(1);
        self.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        self.recalculate();
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Live preview of `unit_price * quantity`.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Whether [`commit`](Self::commit) would add anything.
    pub fn can_commit(&self) -> bool {
        self.selected.is_some() && self.quantity > 0
    }

    /// Add the selection to `ticket` and reset to defaults.
    ///
    /// An incomplete selection is ignored and left untouched.
    pub async fn commit(
        &mut self,
        ticket: &mut Ticket,
    ) -> bool {
        if !self.can_commit() {
            return false;
        }
        let Some(name) = self
            .selected
            .and_then(|i| ticket.catalog().get(i))
            .map(|p| p.name.clone())
        else {
            return false;
        };

        let added = ticket.add_line(&name, self.quantity).await;
        if added {
            *self = Self::default();
        }
        added
    }

    fn recalculate(&mut self) {
        self.subtotal = if self.can_commit() {
            self.unit_price * Decimal::from(self.quantity)
        } else {
            Decimal::ZERO
        };
    }
}
