//! Wildflour Core - Shared types library.
//!
//! This crate provides the common types used across all Wildflour components:
//! - `store` - Client-side cart and favorites state containers
//! - `integration-tests` - Cross-crate persistence tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, catalog snapshots, cart line items,
//!   and favorite entries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
