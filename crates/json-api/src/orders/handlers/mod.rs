//! Order Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use greengrocer::orders::OrderItemSnapshot;
use greengrocer_app::domain::orders::records::OrderRecord;

pub(crate) mod admin;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod status;

/// Snapshot of an ordered product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product: Uuid,

    /// Product name when ordered
    pub name: String,

    /// Unit price when ordered
    pub unit_price: String,

    pub quantity: u32,

    pub line_total: String,
}

impl From<OrderItemSnapshot> for OrderItemResponse {
    fn from(item: OrderItemSnapshot) -> Self {
        let line_total = item
            .line_total()
            .map(|total| total.to_string())
            .unwrap_or_default();

        OrderItemResponse {
            product: item.product,
            name: item.name,
            unit_price: item.unit_price.to_string(),
            quantity: item.quantity,
            line_total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Owner of the order
    pub user_uuid: Uuid,

    pub user_email: String,

    pub customer_name: String,

    pub contact_number: String,

    pub delivery_address: String,

    pub notes: Option<String>,

    pub items: Vec<OrderItemResponse>,

    /// Sum of the item line totals
    pub total_amount: String,

    /// `pending`, `in-progress` or `delivered`
    pub status: String,

    /// Display label for the status
    pub status_label: String,

    pub created_at: String,

    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user_uuid: order.user_uuid.into(),
            user_email: order.user_email,
            customer_name: order.delivery.customer_name,
            contact_number: order.delivery.contact_number,
            delivery_address: order.delivery.delivery_address,
            notes: order.delivery.notes,
            items: order.items.into_iter().map(Into::into).collect(),
            total_amount: order.total_amount.to_string(),
            status: order.status.as_str().to_string(),
            status_label: order.status.label().to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Orders, newest first
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<OrderRecord>> for OrdersResponse {
    fn from(orders: Vec<OrderRecord>) -> Self {
        OrdersResponse {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}
