//! Cart line item type.

use serde::{Deserialize, Serialize};

use crate::types::{ProductId, ProductSnapshot};

/// One product entry in the cart, carrying a quantity.
///
/// The collection holds at most one line item per product ID; adding the same
/// product again increments `quantity` instead of creating a duplicate line.
/// `quantity` is always at least 1 - a line whose quantity would drop to zero
/// is removed from the collection instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Stable external product key.
    pub id: ProductId,
    /// Display name snapshot at the time of adding.
    pub name: String,
    /// Unit price snapshot at the time of adding.
    pub price: f64,
    /// Display image snapshot at the time of adding.
    pub image: String,
    /// Number of units, always >= 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Create a line item with quantity 1 from a catalog snapshot.
    #[must_use]
    pub fn new(product: &ProductSnapshot) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
