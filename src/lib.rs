//! Greengrocer
//!
//! Domain types for a small online grocery store: the product catalog, the
//! customer's cart, order requests and the order status lifecycle. This crate
//! does no I/O beyond reading catalog fixtures; storage and HTTP live in the
//! `greengrocer-app` and `greengrocer-json` crates.

pub mod cart;
pub mod fixtures;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod status;
