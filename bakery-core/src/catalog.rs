//! The fixed set of products the storefront sells.

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Product;

/// Errors raised while building a [`Catalog`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product name must not be blank")]
    BlankName,

    #[error("duplicate product '{0}' in catalog")]
    DuplicateName(String),

    #[error("product '{name}' has non-positive price {price}")]
    NonPositivePrice { name: String, price: Decimal },
}

/// Read-only list of products, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting blank or duplicate names and prices ≤ 0.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if product.name.trim().is_empty() {
                return Err(CatalogError::BlankName);
            }
            if product.unit_price <= Decimal::ZERO {
                return Err(CatalogError::NonPositivePrice {
                    name: product.name.clone(),
                    price: product.unit_price,
                });
            }
            if !seen.insert(product.name.as_str()) {
                return Err(CatalogError::DuplicateName(product.name.clone()));
            }
        }
        Ok(Self { products })
    }

    /// The storefront's hardcoded product list.
    pub fn bakery() -> Self {
        Self {
            products: vec![
                Product::new("Chapata", Decimal::new(65, 2), "🥖"),
                Product::new("Baguette", Decimal::new(55, 2), "🥖"),
                Product::new("Pistola", Decimal::new(45, 2), "🍞"),
                Product::new("Pan Integral", Decimal::new(80, 2), "🍞"),
                Product::new("Croissant", Decimal::new(120, 2), "🥐"),
                Product::new("Magdalena", Decimal::new(90, 2), "🧁"),
            ],
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(
        &self,
        index: usize,
    ) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn find(
        &self,
        name: &str,
    ) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Resolve a user-supplied reference: a zero-based index or an exact
    /// name, falling back to a case-insensitive name match.
    pub fn resolve(
        &self,
        reference: &str,
    ) -> Option<usize> {
        let reference = reference.trim();
        if let Ok(index) = reference.parse::<usize>() {
            return (index < self.products.len()).then_some(index);
        }
        self.products
            .iter()
            .position(|p| p.name == reference)
            .or_else(|| {
                self.products
                    .iter()
                    .position(|p| p.name.eq_ignore_ascii_case(reference))
            })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::bakery()
    }
}
