//! Orders service.

use async_trait::async_trait;
use dazzle::{
    ids::UserId,
    orders::{Order, OrderId, OrderRequest, PENDING},
    pricing::{ShippingPolicy, calculate_totals},
};
use mockall::automock;
use tracing::{Span, debug, info, warn};

use crate::{
    database::Db,
    domain::{
        orders::{
            errors::OrdersServiceError,
            repository::{NewOrder, PgOrdersRepository},
        },
        products::repository::PgProductsRepository,
    },
};

/// Outcome of [`OrdersService::create_order`].
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    /// The stored order.
    pub order: Order,

    /// The idempotency key had already been used; `order` is the original.
    pub replayed: bool,
}

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    policy: ShippingPolicy,
    orders_repository: PgOrdersRepository,
    products_repository: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, policy: ShippingPolicy) -> Self {
        Self {
            db,
            policy,
            orders_repository: PgOrdersRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, request),
        fields(
            user_id = tracing::field::Empty,
            item_count = request.items.len(),
            idempotency_key = tracing::field::Empty,
            total_amount = tracing::field::Empty
        ),
        err
    )]
    async fn create_order(
        &self,
        request: OrderRequest,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        let payment_method = request.validate()?;

        let span = Span::current();

        if let Some(user) = request.user_id {
            span.record("user_id", tracing::field::display(user));
        }

        if let Some(key) = request.idempotency_key {
            span.record("idempotency_key", tracing::field::display(key));
        }

        let mut tx = self.db.begin().await?;

        if let Some(key) = request.idempotency_key
            && let Some(existing) = self
                .orders_repository
                .get_order_by_idempotency_key(&mut tx, key)
                .await?
        {
            tx.commit().await?;

            debug!(order_id = %existing.id, "replayed order placement");

            return Ok(PlacedOrder {
                order: existing,
                replayed: true,
            });
        }

        let mut items = request.items;

        self.products_repository
            .load_product_details(&mut tx, &mut items)
            .await?;

        let unknown: Vec<_> = items
            .iter()
            .filter(|item| item.product_details.is_none())
            .map(|item| item.product_id)
            .collect();

        if !unknown.is_empty() {
            return Err(OrdersServiceError::UnknownProducts(unknown));
        }

        let totals = calculate_totals(&items, &self.policy);

        span.record("total_amount", totals.total);

        if request.total_amount != totals.total {
            warn!(
                client_total = request.total_amount,
                server_total = totals.total,
                "client order total differs from current prices, using server total"
            );
        }

        if request.status != PENDING {
            debug!(requested = %request.status, "ignoring requested status for new order");
        }

        let created = self
            .orders_repository
            .create_order(
                &mut tx,
                NewOrder {
                    user_id: request.user_id,
                    items: &items,
                    status: PENDING,
                    total_amount: totals.total,
                    shipping_address: &request.shipping_address,
                    payment_method,
                    idempotency_key: request.idempotency_key,
                },
            )
            .await?;

        let placed = match (created, request.idempotency_key) {
            (Some(order), _) => PlacedOrder {
                order,
                replayed: false,
            },
            (None, Some(key)) => PlacedOrder {
                order: self
                    .orders_repository
                    .get_order_by_idempotency_key(&mut tx, key)
                    .await?
                    .ok_or(OrdersServiceError::AlreadyExists)?,
                replayed: true,
            },
            (None, None) => return Err(OrdersServiceError::AlreadyExists),
        };

        tx.commit().await?;

        info!(
            order_id = %placed.order.id,
            total_amount = placed.order.total_amount,
            replayed = placed.replayed,
            "placed order"
        );

        Ok(placed)
    }

    async fn list_orders(&self, user: UserId) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders_repository.list_user_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderId,
        status: String,
    ) -> Result<Order, OrdersServiceError> {
        let status = status.trim();

        if status.is_empty() {
            return Err(OrdersServiceError::InvalidStatus);
        }

        let mut tx = self.db.begin().await?;

        let updated = self
            .orders_repository
            .update_order_status(&mut tx, order, status)
            .await?;

        tx.commit().await?;

        info!(order_id = %updated.id, status = %updated.status, "updated order status");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order.
    ///
    /// Line-item snapshots are refreshed from the product table and the total
    /// is recomputed with the configured shipping policy. A request carrying an
    /// idempotency key that was already used returns the original order,
    /// flagged as replayed.
    async fn create_order(&self, request: OrderRequest) -> Result<PlacedOrder, OrdersServiceError>;

    /// Retrieve a user's orders, newest first.
    async fn list_orders(&self, user: UserId) -> Result<Vec<Order>, OrdersServiceError>;

    /// Set an order's status.
    async fn update_status(
        &self,
        order: OrderId,
        status: String,
    ) -> Result<Order, OrdersServiceError>;
}
