//! Greengrocer client
//!
//! Talks to the storefront's JSON API and keeps the customer-side state: a
//! session that owns the cart and bearer token, a poller that follows an
//! order until it is delivered, and a view model that decides which order
//! actions the signed-in user may take.

pub mod api;
pub mod cart_store;
pub mod config;
pub mod error;
pub mod models;
pub mod poller;
pub mod session;
pub mod view;

pub use api::{HttpApi, StorefrontApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use session::Session;

#[cfg(test)]
mod test_helpers;
