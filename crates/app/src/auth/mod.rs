//! Authentication

mod errors;
mod models;
mod password;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use password::*;
pub use service::*;
pub use token::*;
