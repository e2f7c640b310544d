//! Carts Repository

use dazzle::{
    cart::{Cart, CartId},
    ids::UserId,
    items::LineItem,
};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query, query_scalar, types::Json};

const GET_OR_CREATE_USER_CART_SQL: &str = include_str!("sql/get_or_create_user_cart.sql");
const GET_CART_VERSION_SQL: &str = include_str!("sql/get_cart_version.sql");
const REPLACE_CART_ITEMS_SQL: &str = include_str!("sql/replace_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_or_create_user_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Cart, sqlx::Error> {
        query(GET_OR_CREATE_USER_CART_SQL)
            .bind(user.into_inner())
            .try_map(cart_from_row)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_version(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Option<i64>, sqlx::Error> {
        query_scalar(GET_CART_VERSION_SQL)
            .bind(cart.into_inner())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Overwrite the item list. Returns `None` when the cart is missing or the
    /// version did not match `expected_version`.
    pub(crate) async fn replace_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        items: &[LineItem],
        expected_version: Option<i64>,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query(REPLACE_CART_ITEMS_SQL)
            .bind(cart.into_inner())
            .bind(Json(items))
            .bind(expected_version)
            .try_map(cart_from_row)
            .fetch_optional(&mut **tx)
            .await
    }
}

fn cart_from_row(row: PgRow) -> sqlx::Result<Cart> {
    let Json(items) = row.try_get::<Json<Vec<LineItem>>, _>("items")?;

    Ok(Cart {
        id: CartId::new(row.try_get("id")?),
        user_id: row.try_get::<Option<i64>, _>("user_id")?.map(UserId::new),
        items,
        version: row.try_get("version")?,
        created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
    })
}
