//! Greengrocer prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, CartProduct},
    fixtures::{CatalogEntry, FixtureError, load_catalog, parse_catalog},
    orders::{
        DeliveryDetails, OrderItemSnapshot, OrderLine, OrderRequest, OrderRequestError,
        total_amount,
    },
    pricing::{Priced, PricingError, format_money, line_total, validate_price},
    products::{Category, UnknownCategory},
    status::{OrderStatus, StatusTransitionError},
};
