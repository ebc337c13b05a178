//! Pricing

use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use thiserror::Error;

/// Number of decimal places prices are stored with.
pub const PRICE_SCALE: u32 = 2;

/// Largest unit price the catalog stores, `99,999,999.99`.
pub fn max_unit_price() -> Decimal {
    Decimal::new(9_999_999_999, PRICE_SCALE)
}

/// Largest amount an order total may reach, `9,999,999,999.99`.
pub fn max_order_total() -> Decimal {
    Decimal::new(999_999_999_999, PRICE_SCALE)
}

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Price is negative or has more than two decimal places.
    #[error("invalid price: {0}")]
    InvalidPrice(Decimal),

    /// Amount is above what can be stored.
    #[error("{amount} exceeds the maximum of {max}")]
    OutOfRange {
        /// Offending amount
        amount: Decimal,
        /// Largest accepted amount
        max: Decimal,
    },

    /// Arithmetic overflowed the decimal range.
    #[error("price calculation overflowed")]
    Overflow,
}

/// Anything that contributes `unit_price × quantity` to a total.
pub trait Priced {
    /// Price of a single unit.
    fn unit_price(&self) -> Decimal;

    /// Number of units.
    fn quantity(&self) -> u32;
}

/// Validate a unit price: non-negative, at most two decimal places and no
/// larger than [`max_unit_price`].
///
/// # Errors
///
/// - [`PricingError::InvalidPrice`]: the price is negative or too precise.
/// - [`PricingError::OutOfRange`]: the price is above [`max_unit_price`].
pub fn validate_price(price: Decimal) -> Result<Decimal, PricingError> {
    if price < Decimal::ZERO || price.normalize().scale() > PRICE_SCALE {
        return Err(PricingError::InvalidPrice(price));
    }

    ensure_within(price, max_unit_price())?;

    Ok(price.round_dp(PRICE_SCALE))
}

/// Reject `amount` if it is above `max`.
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] when `amount > max`.
pub fn ensure_within(amount: Decimal, max: Decimal) -> Result<Decimal, PricingError> {
    if amount > max {
        return Err(PricingError::OutOfRange { amount, max });
    }

    Ok(amount)
}

/// Calculates `unit_price × quantity`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the multiplication overflows.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Result<Decimal, PricingError> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// Calculates the total of all lines.
///
/// An empty slice totals zero.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any step overflows.
pub fn total<T: Priced>(lines: &[T]) -> Result<Decimal, PricingError> {
    lines.iter().try_fold(Decimal::ZERO, |acc, line| {
        acc.checked_add(line_total(line.unit_price(), line.quantity())?)
            .ok_or(PricingError::Overflow)
    })
}

/// Format an amount for display, e.g. `$5.98`.
pub fn format_money(amount: Decimal) -> String {
    Money::from_decimal(amount.round_dp(PRICE_SCALE), iso::USD).to_string()
}
