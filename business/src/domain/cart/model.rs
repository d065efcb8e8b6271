use rust_decimal::Decimal;

use crate::domain::shared::value_objects::ProductId;

use super::errors::CartError;

/// Catalog descriptor handed over when a product is added to the cart.
/// Every field is a snapshot taken at add time; the cart never re-reads
/// the catalog afterwards, so a later price change does not touch lines
/// already in the cart.
#[derive(Debug, Clone)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub sku: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(snapshot: ProductSnapshot) -> Result<Self, CartError> {
        if snapshot.id.as_str().trim().is_empty() {
            return Err(CartError::IdEmpty);
        }
        if snapshot.price < Decimal::ZERO {
            return Err(CartError::PriceNegative);
        }

        Ok(Self {
            id: snapshot.id,
            name: snapshot.name,
            price: snapshot.price,
            image: snapshot.image,
            sku: snapshot.sku,
            quantity: 1,
        })
    }

    /// Constructor for data already persisted in a storage slot (no validation).
    pub fn from_stored(
        id: ProductId,
        name: String,
        price: Decimal,
        image: Option<String>,
        sku: String,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            name,
            price,
            image,
            sku,
            quantity,
        }
    }

    /// Price of the whole line: unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
