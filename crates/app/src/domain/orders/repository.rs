//! Orders Repository

use dazzle::{
    checkout::{PaymentMethod, ShippingAddress},
    ids::UserId,
    items::LineItem,
    orders::{Order, OrderId},
};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query, types::Json};
use uuid::Uuid;

use crate::domain::columns::{amount_to_db, try_get_amount};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_BY_IDEMPOTENCY_KEY_SQL: &str = include_str!("sql/get_order_by_idempotency_key.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

/// Insert data for an order whose items and total have already been settled.
#[derive(Debug)]
pub(crate) struct NewOrder<'a> {
    pub(crate) user_id: Option<UserId>,
    pub(crate) items: &'a [LineItem],
    pub(crate) status: &'a str,
    pub(crate) total_amount: u64,
    pub(crate) shipping_address: &'a ShippingAddress,
    pub(crate) payment_method: PaymentMethod,
    pub(crate) idempotency_key: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an order. Returns `None` when an order with the same
    /// idempotency key already exists.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder<'_>,
    ) -> Result<Option<Order>, sqlx::Error> {
        let total_amount = amount_to_db(order.total_amount, "total_amount")?;

        query(CREATE_ORDER_SQL)
            .bind(order.user_id.map(UserId::into_inner))
            .bind(Json(order.items))
            .bind(order.status)
            .bind(total_amount)
            .bind(Json(order.shipping_address))
            .bind(order.payment_method.as_str())
            .bind(order.idempotency_key)
            .try_map(order_from_row)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_by_idempotency_key(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: Uuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query(GET_ORDER_BY_IDEMPOTENCY_KEY_SQL)
            .bind(key)
            .try_map(order_from_row)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query(LIST_USER_ORDERS_SQL)
            .bind(user.into_inner())
            .try_map(order_from_row)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        status: &str,
    ) -> Result<Order, sqlx::Error> {
        query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_inner())
            .bind(status)
            .try_map(order_from_row)
            .fetch_one(&mut **tx)
            .await
    }
}

fn order_from_row(row: PgRow) -> sqlx::Result<Order> {
    let Json(items) = row.try_get::<Json<Vec<LineItem>>, _>("items")?;
    let Json(shipping_address) = row.try_get::<Json<ShippingAddress>, _>("shipping_address")?;

    Ok(Order {
        id: OrderId::new(row.try_get("id")?),
        user_id: row.try_get::<Option<i64>, _>("user_id")?.map(UserId::new),
        items,
        status: row.try_get("status")?,
        total_amount: try_get_amount(&row, "total_amount")?,
        shipping_address,
        payment_method: row.try_get("payment_method")?,
        created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        idempotency_key: row.try_get("idempotency_key")?,
    })
}
