//! Orders service.
//!
//! Placing an order takes stock for every line inside one transaction. Each
//! line is a single conditional decrement, so stock can never go negative, and
//! any failing line rolls back the lines taken before it.

use async_trait::async_trait;
use greengrocer::{
    orders::{self, OrderItemSnapshot, OrderLine},
    status::OrderStatus,
};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    auth::AuthenticatedUser,
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, StatusChange},
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repository::{OrderRow, PgOrdersRepository},
        },
        products::{records::ProductUuid, repository::PgProductsRepository},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    products: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    /// Work out why stock could not be taken for a line.
    async fn stock_failure(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: &OrderLine,
    ) -> OrdersServiceError {
        let product = ProductUuid::from_uuid(line.product);

        match self.products.get_stock(tx, product).await {
            Ok(Some(level)) => OrdersServiceError::InsufficientStock {
                product: line.product,
                name: level.name,
                available: level.stock,
                requested: line.quantity,
            },
            Ok(None) => OrdersServiceError::ProductNotFound(line.product),
            Err(error) => error.into(),
        }
    }

    async fn load_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        rows: Vec<OrderRow>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let uuids: Vec<Uuid> = rows.iter().map(|row| row.uuid().into_uuid()).collect();
        let mut items = self.orders.list_order_items(tx, &uuids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let order_items = items.remove(&row.uuid().into_uuid()).unwrap_or_default();

                row.with_items(order_items)
            })
            .collect())
    }

    async fn load_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let row = self
            .orders
            .get_order(tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        self.load_items(tx, vec![row])
            .await?
            .pop()
            .ok_or(OrdersServiceError::NotFound)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        let NewOrder {
            uuid,
            user,
            request,
        } = order;

        let (delivery, lines) = request.into_parts();

        let mut tx = self.db.begin_transaction().await?;
        let mut items = Vec::with_capacity(lines.len());

        for line in &lines {
            let product = ProductUuid::from_uuid(line.product);

            let Some(taken) = self
                .products
                .take_stock(&mut tx, product, line.quantity)
                .await?
            else {
                let error = self.stock_failure(&mut tx, line).await;

                debug!(order = %uuid, %product, %error, "order rejected");

                return Err(error);
            };

            debug!(order = %uuid, %product, remaining = taken.remaining, "stock taken");

            items.push(OrderItemSnapshot {
                product: line.product,
                name: taken.name,
                unit_price: taken.price,
                quantity: line.quantity,
            });
        }

        let total_amount = orders::total_amount(&items)?;

        let row = self
            .orders
            .create_order(&mut tx, uuid, user, &delivery, total_amount)
            .await?;

        for (position, item) in items.iter().enumerate() {
            self.orders
                .create_order_item(&mut tx, uuid, position, item)
                .await?;
        }

        tx.commit().await?;

        info!(order = %uuid, %user, %total_amount, lines = items.len(), "order placed");

        Ok(row.with_items(items))
    }

    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows = self.orders.list_user_orders(&mut tx, user).await?;
        let orders = self.load_items(&mut tx, rows).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        viewer: AuthenticatedUser,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.load_order(&mut tx, order).await?;

        tx.commit().await?;

        // Other customers' orders are reported as missing.
        if !viewer.is_admin && order.user_uuid != viewer.uuid {
            return Err(OrdersServiceError::NotFound);
        }

        Ok(order)
    }

    async fn list_all_orders(
        &self,
        viewer: AuthenticatedUser,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        if !viewer.is_admin {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin_transaction().await?;

        let rows = self.orders.list_all_orders(&mut tx).await?;
        let orders = self.load_items(&mut tx, rows).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        viewer: AuthenticatedUser,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(OrderRecord, StatusChange), OrdersServiceError> {
        if !viewer.is_admin {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin_transaction().await?;

        let current = self
            .orders
            .get_order_status(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let next = current.transition_to(status)?;

        let rows_affected = self
            .orders
            .update_order_status(&mut tx, order, current, next)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::StatusConflict);
        }

        let updated = self.load_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(%order, from = %current, to = %next, admin = %viewer.uuid, "order status changed");

        Ok((
            updated,
            StatusChange {
                from: current,
                to: next,
            },
        ))
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order: takes stock for every line, snapshots names and
    /// prices, and stores the order as pending. Nothing is changed on failure.
    async fn place_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// A customer's own orders, newest first.
    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// A single order, visible to its owner and to admins.
    async fn get_order(
        &self,
        viewer: AuthenticatedUser,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Every order, newest first. Admin only.
    async fn list_all_orders(
        &self,
        viewer: AuthenticatedUser,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Advance an order to its next status. Admin only.
    async fn update_status(
        &self,
        viewer: AuthenticatedUser,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(OrderRecord, StatusChange), OrdersServiceError>;
}
