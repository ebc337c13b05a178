//! Orders service errors.

use greengrocer::{
    orders::OrderRequestError, pricing::PricingError, status::StatusTransitionError,
};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// SQLSTATE raised when a value does not fit its `NUMERIC` column.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error(transparent)]
    InvalidRequest(#[from] OrderRequestError),

    #[error("Product {0} not found")]
    ProductNotFound(Uuid),

    #[error("Insufficient stock for {name}. Available: {available}")]
    InsufficientStock {
        product: Uuid,
        name: String,
        available: u32,
        requested: u32,
    },

    #[error("order not found")]
    NotFound,

    #[error("admin access required")]
    Forbidden,

    #[error(transparent)]
    InvalidTransition(#[from] StatusTransitionError),

    #[error("order status changed concurrently")]
    StatusConflict,

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("order total could not be calculated")]
    Pricing(#[from] PricingError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if error
            .as_database_error()
            .and_then(DatabaseError::code)
            .is_some_and(|code| code == NUMERIC_VALUE_OUT_OF_RANGE)
        {
            return Self::InvalidData;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
