//! Cart
//!
//! A customer's shopping cart. Lines are keyed by product and keep the order
//! they were first added in. The cart only knows about products the customer
//! has picked; stock is checked when the order is placed, not here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    orders::OrderLine,
    pricing::{self, Priced, PricingError},
};

/// Errors that can occur while changing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Adding zero units.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    UnknownProduct(Uuid),

    /// Merged quantity does not fit.
    #[error("quantity for product {0} is too large")]
    QuantityOverflow(Uuid),
}

/// A product as shown to the customer when adding it to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProduct {
    /// Product ID
    pub product: Uuid,

    /// Display name
    pub name: String,

    /// Unit price
    pub unit_price: Decimal,

    /// Image reference
    pub image: String,
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product ID
    pub product: Uuid,

    /// Display name
    pub name: String,

    /// Unit price at the time the product was added
    pub unit_price: Decimal,

    /// Number of units
    pub quantity: u32,

    /// Image reference
    pub image: String,
}

impl Priced for CartLine {
    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product.
    ///
    /// Adding a product already in the cart increases its quantity and
    /// refreshes its name, price and image.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`]: `quantity` is zero.
    /// - [`CartError::QuantityOverflow`]: the merged quantity overflows.
    pub fn add(&mut self, product: CartProduct, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        if let Some(line) = self.line_mut(product.product) {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(CartError::QuantityOverflow(product.product))?;
            line.name = product.name;
            line.unit_price = product.unit_price;
            line.image = product.image;

            return Ok(());
        }

        self.lines.push(CartLine {
            product: product.product,
            name: product.name,
            unit_price: product.unit_price,
            quantity,
            image: product.image,
        });

        Ok(())
    }

    /// Set the quantity of a line. Zero removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownProduct`] if the product is not in the cart.
    pub fn set_quantity(&mut self, product: Uuid, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self
                .remove(product)
                .map(|_line| ())
                .ok_or(CartError::UnknownProduct(product));
        }

        let line = self
            .line_mut(product)
            .ok_or(CartError::UnknownProduct(product))?;

        line.quantity = quantity;

        Ok(())
    }

    /// Remove a product, returning its line if it was present.
    pub fn remove(&mut self, product: Uuid) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.product == product)?;

        Some(self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `unit_price × quantity` over all lines.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the sum overflows.
    pub fn total(&self) -> Result<Decimal, PricingError> {
        pricing::total(&self.lines)
    }

    /// The cart's contents as order lines, in cart order.
    pub fn to_order_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|line| OrderLine {
                product: line.product,
                quantity: line.quantity,
            })
            .collect()
    }

    fn line_mut(&mut self, product: Uuid) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product == product)
    }
}
