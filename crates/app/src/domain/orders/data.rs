//! Orders Data

use greengrocer::{orders::OrderRequest, status::OrderStatus};

use crate::domain::{orders::records::OrderUuid, users::records::UserUuid};

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub request: OrderRequest,
}

/// Order Status Change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: OrderStatus,
    pub to: OrderStatus,
}
