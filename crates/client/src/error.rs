//! Client errors.

use greengrocer::{cart::CartError, orders::OrderRequestError};
use thiserror::Error;

use crate::cart_store::CartStoreError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response, or its body could not be read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{message} ({status})")]
    Api { status: u16, message: String },

    /// The action needs a signed-in user.
    #[error("sign in first")]
    NotSignedIn,

    /// Checkout was attempted with nothing in the cart.
    #[error("your cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    InvalidOrder(#[from] OrderRequestError),

    #[error("cart storage failed: {0}")]
    CartStore(#[from] CartStoreError),
}

impl ClientError {
    /// HTTP status of an API rejection.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API rejected the bearer token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
