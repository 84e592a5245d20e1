use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// One aggregated entry per distinct product on the ticket.
///
/// `total` always equals `unit_price * quantity` once a ledger operation
/// has completed. The serialized field names are the persisted record's
/// wire names, so they must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketLine {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub glyph: String,
}

impl TicketLine {
    /// Start a new line for `product` with the given quantity.
    pub fn for_product(
        product: &Product,
        quantity: u32,
    ) -> Self {
        Self {
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity,
            total: product.subtotal(quantity),
            glyph: product.glyph.clone(),
        }
    }

    /// Recompute `total` from `unit_price` and `quantity`.
    pub fn recalculate(&mut self) {
        self.total = self.unit_price * Decimal::from(self.quantity);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn for_product_computes_total() {
        let chapata = Product::new("Chapata", dec!(0.65), "🥖");

        let line = TicketLine::for_product(&chapata, 2);

        assert_eq!(line.quantity, 2);
        assert_eq!(line.total, dec!(1.30));
        assert_eq!(line.glyph, "🥖");
    }

    #[test]
    fn recalculate_tracks_quantity_changes() {
        let croissant = Product::new("Croissant", dec!(1.20), "🥐");
        let mut line = TicketLine::for_product(&croissant, 1);

        line.quantity = 5;
        line.recalculate();

        assert_eq!(line.total, dec!(6.00));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let line = TicketLine::for_product(&Product::new("Pistola", dec!(0.45), "🍞"), 3);

        let json = serde_json::to_value(&line).expect("line should serialize");

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Pistola",
                "unitPrice": 0.45,
                "quantity": 3,
                "total": 1.35,
                "glyph": "🍞",
            })
        );
    }
}
