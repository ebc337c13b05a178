//! API payloads as seen by the client.

use greengrocer::{
    cart::CartProduct,
    orders::{DeliveryDetails, OrderLine},
    products::Category,
    status::OrderStatus,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uuid: Uuid,
    pub email: String,
    pub is_admin: bool,
    pub created_at: String,
}

/// A bearer token and the user it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub expires_at: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifiedUser {
    pub(crate) user: User,
}

/// Email and password.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub uuid: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: Category,
    pub stock: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        CartProduct {
            product: product.uuid,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
        }
    }
}

/// One page of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsPage {
    pub products: Vec<Product>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_products: u64,
}

/// Catalog listing parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<Category>,
}

/// A product snapshot inside an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub user_email: String,
    pub customer_name: String,
    pub contact_number: String,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub status_label: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderList {
    pub(crate) orders: Vec<Order>,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceOrder {
    pub customer_name: String,
    pub contact_number: String,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub items: Vec<OrderLine>,
}

impl PlaceOrder {
    #[must_use]
    pub fn new(delivery: DeliveryDetails, items: Vec<OrderLine>) -> Self {
        Self {
            customer_name: delivery.customer_name,
            contact_number: delivery.contact_number,
            delivery_address: delivery.delivery_address,
            notes: delivery.notes,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn order_decodes_decimal_strings_and_wire_status() -> TestResult {
        let order: Order = serde_json::from_value(json!({
            "uuid": Uuid::nil(),
            "user_uuid": Uuid::nil(),
            "user_email": "ada@example.com",
            "customer_name": "Ada Lovelace",
            "contact_number": "555-0100",
            "delivery_address": "12 Analytical Row",
            "notes": null,
            "items": [{
                "product": Uuid::nil(),
                "name": "Fresh Apples",
                "unit_price": "2.99",
                "quantity": 2,
                "line_total": "5.98"
            }],
            "total_amount": "5.98",
            "status": "in-progress",
            "status_label": "In Progress",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        }))?;

        assert_eq!(order.total_amount, Decimal::new(598, 2));
        assert_eq!(order.status, OrderStatus::InProgress);

        Ok(())
    }
}
