//! Catalog snapshot supplied when adding an item.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Catalog fields captured at the moment a product is added to the cart or
/// favorited.
///
/// Snapshot semantics: `name`, `price`, and `image` are frozen at the time of
/// the add and are never refreshed from the catalog afterwards. If the
/// catalog later changes a price, existing cart lines and favorites keep the
/// value they were created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Stable external product key.
    pub id: ProductId,
    /// Display name at the time of the add.
    pub name: String,
    /// Unit price at the time of the add.
    pub price: f64,
    /// Display image reference at the time of the add.
    pub image: String,
}

impl ProductSnapshot {
    /// Create a snapshot from catalog fields.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}
