//! Storage, services and authentication for the greengrocer store.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod health;

#[cfg(test)]
mod test;

mod uuids;
