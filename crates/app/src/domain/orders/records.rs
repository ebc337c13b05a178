//! Order Records

use greengrocer::{
    orders::{DeliveryDetails, OrderItemSnapshot},
    status::OrderStatus,
};
use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
///
/// Items are snapshots taken when the order was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub user_email: String,
    pub delivery: DeliveryDetails,
    pub items: Vec<OrderItemSnapshot>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
