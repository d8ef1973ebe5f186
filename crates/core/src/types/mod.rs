//! Core types for Wildflour.
//!
//! This module provides the shared domain vocabulary: product references,
//! catalog snapshots, and the items held by the cart and favorites stores.

pub mod cart;
pub mod favorites;
pub mod id;
pub mod product;

pub use cart::CartLineItem;
pub use favorites::FavoriteItem;
pub use id::ProductId;
pub use product::ProductSnapshot;
