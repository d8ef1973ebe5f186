//! Favorite entry type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ProductId, ProductSnapshot};

/// A saved product in the favorites list.
///
/// The collection holds at most one entry per product ID. `date_added` is set
/// once when the entry is created and never updated afterwards, including by
/// repeated add calls for the same product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteItem {
    /// Stable external product key.
    pub id: ProductId,
    /// Display name snapshot at the time of favoriting.
    pub name: String,
    /// Unit price snapshot at the time of favoriting.
    pub price: f64,
    /// Display image snapshot at the time of favoriting.
    pub image: String,
    /// When this entry was created. Immutable after insertion.
    pub date_added: DateTime<Utc>,
}

impl FavoriteItem {
    /// Create a favorite entry from a catalog snapshot, stamped with
    /// `date_added`.
    #[must_use]
    pub fn new(product: &ProductSnapshot, date_added: DateTime<Utc>) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            date_added,
        }
    }
}
