//! Orders Repository

use greengrocer::{
    orders::{DeliveryDetails, OrderItemSnapshot},
    status::OrderStatus,
};
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::decode_error,
    domain::{
        orders::records::{OrderRecord, OrderUuid},
        users::records::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const LIST_ALL_ORDERS_SQL: &str = include_str!("sql/list_all_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const GET_ORDER_STATUS_SQL: &str = include_str!("sql/get_order_status.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

/// Order columns without items.
#[derive(Debug, Clone)]
pub(crate) struct OrderRow {
    uuid: OrderUuid,
    user_uuid: UserUuid,
    user_email: String,
    delivery: DeliveryDetails,
    total_amount: Decimal,
    status: OrderStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl OrderRow {
    pub(crate) fn uuid(&self) -> OrderUuid {
        self.uuid
    }

    pub(crate) fn with_items(self, items: Vec<OrderItemSnapshot>) -> OrderRecord {
        OrderRecord {
            uuid: self.uuid,
            user_uuid: self.user_uuid,
            user_email: self.user_email,
            delivery: self.delivery,
            items,
            total_amount: self.total_amount,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        delivery: &DeliveryDetails,
        total_amount: Decimal,
    ) -> Result<OrderRow, sqlx::Error> {
        query_as::<Postgres, OrderRow>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(&delivery.customer_name)
            .bind(&delivery.contact_number)
            .bind(&delivery.delivery_address)
            .bind(delivery.notes.as_deref())
            .bind(total_amount)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        position: usize,
        item: &OrderItemSnapshot,
    ) -> Result<(), sqlx::Error> {
        let position = i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let quantity =
            i32::try_from(item.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query(CREATE_ORDER_ITEM_SQL)
            .bind(order.into_uuid())
            .bind(position)
            .bind(item.product)
            .bind(&item.name)
            .bind(item.unit_price)
            .bind(quantity)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<OrderRow>, sqlx::Error> {
        query_as::<Postgres, OrderRow>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRow>, sqlx::Error> {
        query_as::<Postgres, OrderRow>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_all_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRow>, sqlx::Error> {
        query_as::<Postgres, OrderRow>(LIST_ALL_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Items for each of `orders`, in the order they were placed.
    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[Uuid],
    ) -> Result<FxHashMap<Uuid, Vec<OrderItemSnapshot>>, sqlx::Error> {
        let rows: Vec<(Uuid, Uuid, String, Decimal, i32)> = query_as(LIST_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await?;

        let mut items: FxHashMap<Uuid, Vec<OrderItemSnapshot>> = FxHashMap::default();

        for (order, product, name, unit_price, quantity) in rows {
            items.entry(order).or_default().push(OrderItemSnapshot {
                product,
                name,
                unit_price,
                quantity: u32::try_from(quantity).map_err(|e| decode_error("quantity", e))?,
            });
        }

        Ok(items)
    }

    pub(crate) async fn get_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<OrderStatus>, sqlx::Error> {
        let status: Option<String> = query_scalar(GET_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        status
            .map(|status| status.parse().map_err(|e| decode_error("status", e)))
            .transpose()
    }

    /// Move an order from `from` to `to`, only if it is still at `from`.
    ///
    /// Returns the number of rows changed: zero when another update got there first.
    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(from.as_str())
            .bind(to.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            user_email: row.try_get("user_email")?,
            delivery: DeliveryDetails {
                customer_name: row.try_get("customer_name")?,
                contact_number: row.try_get("contact_number")?,
                delivery_address: row.try_get("delivery_address")?,
                notes: row.try_get("notes")?,
            },
            total_amount: row.try_get("total_amount")?,
            status: status.parse().map_err(|e| decode_error("status", e))?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
