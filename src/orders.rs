//! Orders
//!
//! Order requests as submitted by customers, and the item snapshots an order
//! keeps once placed. Snapshots copy the product's name and unit price at the
//! time of ordering so later catalog edits cannot change an order's total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::pricing::{self, Priced, PricingError};

/// Errors raised while validating an order request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderRequestError {
    /// A required delivery field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The request has no lines.
    #[error("an order must contain at least one item")]
    NoItems,

    /// A line asks for zero units.
    #[error("quantity for product {product} must be at least 1")]
    InvalidQuantity {
        /// Product the line refers to
        product: Uuid,
    },
}

/// Customer contact and delivery details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    /// Name the order is for
    pub customer_name: String,

    /// Phone number to reach the customer
    pub contact_number: String,

    /// Where to deliver
    pub delivery_address: String,

    /// Free-form delivery notes
    pub notes: Option<String>,
}

/// A requested product and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product to order
    pub product: Uuid,

    /// Number of units
    pub quantity: u32,
}

/// A validated order request.
///
/// Lines keep their submitted order; stock checks are applied in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    delivery: DeliveryDetails,
    lines: Vec<OrderLine>,
}

impl OrderRequest {
    /// Validate and normalise a request.
    ///
    /// Text fields are trimmed and blank notes are dropped.
    ///
    /// # Errors
    ///
    /// - [`OrderRequestError::MissingField`]: a required field is blank.
    /// - [`OrderRequestError::NoItems`]: `lines` is empty.
    /// - [`OrderRequestError::InvalidQuantity`]: a line has a zero quantity.
    pub fn new(
        delivery: DeliveryDetails,
        lines: Vec<OrderLine>,
    ) -> Result<Self, OrderRequestError> {
        let delivery = DeliveryDetails {
            customer_name: required("customer name", &delivery.customer_name)?,
            contact_number: required("contact number", &delivery.contact_number)?,
            delivery_address: required("delivery address", &delivery.delivery_address)?,
            notes: delivery
                .notes
                .map(|notes| notes.trim().to_string())
                .filter(|notes| !notes.is_empty()),
        };

        if lines.is_empty() {
            return Err(OrderRequestError::NoItems);
        }

        if let Some(line) = lines.iter().find(|line| line.quantity == 0) {
            return Err(OrderRequestError::InvalidQuantity {
                product: line.product,
            });
        }

        Ok(Self { delivery, lines })
    }

    /// Delivery details.
    pub fn delivery(&self) -> &DeliveryDetails {
        &self.delivery
    }

    /// Requested lines, in submission order.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Split into delivery details and lines.
    pub fn into_parts(self) -> (DeliveryDetails, Vec<OrderLine>) {
        (self.delivery, self.lines)
    }
}

fn required(field: &'static str, value: &str) -> Result<String, OrderRequestError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(OrderRequestError::MissingField(field));
    }

    Ok(trimmed.to_string())
}

/// Copy of a product at the time it was ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemSnapshot {
    /// Product the item was taken from
    pub product: Uuid,

    /// Product name when ordered
    pub name: String,

    /// Unit price when ordered
    pub unit_price: Decimal,

    /// Number of units
    pub quantity: u32,
}

impl OrderItemSnapshot {
    /// `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the multiplication overflows.
    pub fn line_total(&self) -> Result<Decimal, PricingError> {
        pricing::line_total(self.unit_price, self.quantity)
    }
}

impl Priced for OrderItemSnapshot {
    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Total amount of an order's snapshots.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the sum overflows.
/// - [`PricingError::OutOfRange`]: the total is above [`pricing::max_order_total`].
pub fn total_amount(items: &[OrderItemSnapshot]) -> Result<Decimal, PricingError> {
    pricing::ensure_within(pricing::total(items)?, pricing::max_order_total())
}
