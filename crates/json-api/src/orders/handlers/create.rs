//! Create Order Handler

use std::sync::Arc;

use dazzle_app::domain::orders::PlacedOrder;
use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{CreateOrderRequest, OrderResponse},
    },
    observability::record_order_placed,
    state::State,
};

/// Create Order Handler
///
/// Places an order. Line items are re-priced from the catalog and the total
/// recomputed; replaying an idempotency key returns the original order
/// without counting it again.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to create order"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let PlacedOrder { order, replayed } = state
        .app
        .orders
        .create_order(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    if !replayed {
        record_order_placed(&order.payment_method, order.total_amount);
    }

    info!(
        order_id = %order.id,
        request_id = depot.request_id().unwrap_or_default(),
        total_amount = order.total_amount,
        replayed,
        "order placed"
    );

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use dazzle::{
        checkout::CheckoutError,
        ids::UserId,
        orders::{Order, PENDING},
        products::ProductId,
    };
    use dazzle_app::domain::orders::{MockOrdersService, OrdersServiceError};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        observability::orders_placed_count,
        test_helpers::{make_order, orders_service},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("api/orders").post(handler))
    }

    fn placed(order: Order, replayed: bool) -> PlacedOrder {
        PlacedOrder { order, replayed }
    }

    fn body(idempotency_key: Option<Uuid>) -> Value {
        json!({
            "userId": 1,
            "items": [{ "productId": 7, "quantity": 2, "size": "M" }],
            "status": "pending",
            "totalAmount": 359_800,
            "shippingAddress": {
                "fullName": "Riya Sharma",
                "email": "riya@example.com",
                "phone": "9876543210",
                "address": "12 MI Road",
                "city": "Jaipur",
                "state": "Rajasthan",
                "postalCode": "302001"
            },
            "paymentMethod": "upi",
            "idempotencyKey": idempotency_key
        })
    }

    #[tokio::test]
    async fn test_create_order_returns_201() -> TestResult {
        let key = Uuid::now_v7();
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(move |request| {
                request.user_id == Some(UserId::new(1))
                    && request.status == PENDING
                    && request.payment_method == "upi"
                    && request.idempotency_key == Some(key)
                    && request.items.first().map(|item| item.product_id) == Some(ProductId::new(7))
                    && request.shipping_address.city == "Jaipur"
            })
            .return_once(|_| {
                let mut order = make_order(11, 1);
                order.payment_method = "first-placement".to_string();

                Ok(placed(order, false))
            });

        orders.expect_list_orders().never();
        orders.expect_update_status().never();

        let mut res = TestClient::post("http://example.com/api/orders")
            .json(&body(Some(key)))
            .send(&make_service(orders))
            .await;

        let order: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(order.id, 11);
        assert_eq!(order.status, PENDING);
        assert_eq!(orders_placed_count("first-placement"), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_replayed_order_is_not_counted_again() -> TestResult {
        let key = Uuid::now_v7();
        let mut orders = MockOrdersService::new();

        let mut order = make_order(12, 1);
        order.payment_method = "replay-only".to_string();

        orders
            .expect_create_order()
            .times(2)
            .returning(move |_| Ok(placed(order.clone(), true)));

        orders.expect_list_orders().never();
        orders.expect_update_status().never();

        let service = make_service(orders);

        for _ in 0..2 {
            let mut res = TestClient::post("http://example.com/api/orders")
                .json(&body(Some(key)))
                .send(&service)
                .await;

            let order: OrderResponse = res.take_json().await?;

            assert_eq!(res.status_code, Some(StatusCode::CREATED));
            assert_eq!(order.id, 12);
        }

        assert_eq!(orders_placed_count("replay-only"), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_invalid_order_returns_400() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::InvalidOrder(CheckoutError::EmptyCart)));

        orders.expect_list_orders().never();
        orders.expect_update_status().never();

        let res = TestClient::post("http://example.com/api/orders")
            .json(&body(None))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_unknown_products_returns_400() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_| {
                Err(OrdersServiceError::UnknownProducts(vec![ProductId::new(7)]))
            });

        orders.expect_list_orders().never();
        orders.expect_update_status().never();

        let res = TestClient::post("http://example.com/api/orders")
            .json(&body(None))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_storage_error_returns_500() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        orders.expect_list_orders().never();
        orders.expect_update_status().never();

        let res = TestClient::post("http://example.com/api/orders")
            .json(&body(None))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
