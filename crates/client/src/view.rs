//! Order View
//!
//! Display state for an order, derived once from the order and the viewer's
//! [`Capabilities`] so callers never branch on roles themselves.

use greengrocer::{pricing::format_money, status::OrderStatus};

use crate::models::{Order, OrderItem, User};

/// What the signed-in user is allowed to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    manage_orders: bool,
    edit_catalog: bool,
}

impl Capabilities {
    /// Capabilities of `user`; anonymous viewers get none.
    pub fn for_user(user: Option<&User>) -> Self {
        let admin = user.is_some_and(|user| user.is_admin);

        Self {
            manage_orders: admin,
            edit_catalog: admin,
        }
    }

    /// May change any order's status and see every order.
    pub fn can_manage_orders(self) -> bool {
        self.manage_orders
    }

    /// May create, edit and delete products.
    pub fn can_edit_catalog(self) -> bool {
        self.edit_catalog
    }
}

/// A formatted order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&OrderItem> for ItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: format_money(item.unit_price),
            line_total: format_money(item.line_total),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrderView<'a> {
    order: &'a Order,
    capabilities: Capabilities,
}

impl<'a> OrderView<'a> {
    pub fn new(order: &'a Order, capabilities: Capabilities) -> Self {
        Self {
            order,
            capabilities,
        }
    }

    pub fn order(&self) -> &'a Order {
        self.order
    }

    pub fn status(&self) -> OrderStatus {
        self.order.status
    }

    pub fn status_label(&self) -> &'static str {
        self.order.status.label()
    }

    /// Position in the fulfillment progress bar, `0..=2`.
    pub fn step(&self) -> usize {
        self.order.status.step()
    }

    pub fn total(&self) -> String {
        format_money(self.order.total_amount)
    }

    pub fn items(&self) -> Vec<ItemView> {
        self.order.items.iter().map(ItemView::from).collect()
    }

    pub fn is_terminal(&self) -> bool {
        self.order.status.is_terminal()
    }

    /// The status this viewer may move the order to, if any.
    pub fn next_status_action(&self) -> Option<OrderStatus> {
        if !self.capabilities.can_manage_orders() {
            return None;
        }

        self.order.status.next()
    }
}
