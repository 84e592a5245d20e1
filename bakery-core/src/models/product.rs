use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable catalog item. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub unit_price: Decimal,
    pub glyph: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        unit_price: Decimal,
        glyph: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            unit_price,
            glyph: glyph.into(),
        }
    }

    /// Price of `quantity` units of this product.
    pub fn subtotal(
        &self,
        quantity: u32,
    ) -> Decimal {
        self.unit_price * Decimal::from(quantity)
    }
}
