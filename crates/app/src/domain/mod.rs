//! Greengrocer Domain Concerns

pub mod orders;
pub mod products;
pub mod users;
