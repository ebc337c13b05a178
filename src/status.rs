//! Order Status

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fulfillment status of an order.
///
/// Orders move strictly forward: `Pending` → `InProgress` → `Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Order accepted, not yet picked.
    Pending,

    /// Order being prepared or out for delivery.
    InProgress,

    /// Order handed over to the customer.
    Delivered,
}

/// Errors raised when parsing or transitioning an order status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusTransitionError {
    /// The value is not one of the known statuses.
    #[error("unrecognised order status: {0}")]
    Unrecognised(String),

    /// The order is already delivered.
    #[error("order is already {0} and cannot change")]
    Terminal(OrderStatus),

    /// The requested status is not the next step after the current one.
    #[error("cannot move order from {from} to {to}")]
    OutOfSequence {
        /// Current status
        from: OrderStatus,
        /// Requested status
        to: OrderStatus,
    },
}

impl OrderStatus {
    /// All statuses in fulfillment order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Delivered];

    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Delivered => "delivered",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Delivered => "Delivered",
        }
    }

    /// Zero-based position in the fulfillment sequence.
    pub const fn step(self) -> usize {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Delivered => 2,
        }
    }

    /// The status that follows this one, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::InProgress),
            Self::InProgress => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Whether no further transitions are defined.
    pub const fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Validate a transition from `self` to `to`.
    ///
    /// # Errors
    ///
    /// - [`StatusTransitionError::Terminal`]: `self` is terminal.
    /// - [`StatusTransitionError::OutOfSequence`]: `to` is not the next status.
    pub fn transition_to(self, to: Self) -> Result<Self, StatusTransitionError> {
        match self.next() {
            None => Err(StatusTransitionError::Terminal(self)),
            Some(next) if next == to => Ok(to),
            Some(_) => Err(StatusTransitionError::OutOfSequence { from: self, to }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StatusTransitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "delivered" => Ok(Self::Delivered),
            other => Err(StatusTransitionError::Unrecognised(other.to_string())),
        }
    }
}
