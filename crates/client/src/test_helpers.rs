//! Test fixtures.

use greengrocer::{products::Category, status::OrderStatus};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{AuthSession, Order, OrderItem, Product, User};

pub(crate) const ORDER: Uuid = Uuid::from_u128(10);
pub(crate) const APPLES: Uuid = Uuid::from_u128(2);

pub(crate) fn user(is_admin: bool) -> User {
    User {
        uuid: Uuid::from_u128(1),
        email: "ada@example.com".to_string(),
        is_admin,
        created_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

pub(crate) fn auth_session(is_admin: bool) -> AuthSession {
    AuthSession {
        token: "token".to_string(),
        expires_at: "2026-01-02T00:00:00Z".to_string(),
        user: user(is_admin),
    }
}

pub(crate) fn apples() -> Product {
    Product {
        uuid: APPLES,
        name: "Fresh Apples".to_string(),
        description: "Crisp and sweet".to_string(),
        price: Decimal::new(299, 2),
        image: "apples.jpg".to_string(),
        category: Category::Fruit,
        stock: 5,
        created_at: "2026-01-01T00:00:00Z".to_string(),
        updated_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

pub(crate) fn order(status: OrderStatus) -> Order {
    Order {
        uuid: ORDER,
        user_uuid: Uuid::from_u128(1),
        user_email: "ada@example.com".to_string(),
        customer_name: "Ada Lovelace".to_string(),
        contact_number: "555-0100".to_string(),
        delivery_address: "12 Analytical Row".to_string(),
        notes: None,
        items: vec![OrderItem {
            product: APPLES,
            name: "Fresh Apples".to_string(),
            unit_price: Decimal::new(299, 2),
            quantity: 2,
            line_total: Decimal::new(598, 2),
        }],
        total_amount: Decimal::new(598, 2),
        status,
        status_label: status.label().to_string(),
        created_at: "2026-01-01T00:00:00Z".to_string(),
        updated_at: "2026-01-01T00:00:00Z".to_string(),
    }
}
