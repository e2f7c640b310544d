//! `reqwest`-backed storefront API client.

use async_trait::async_trait;
use dazzle::{
    cart::{Cart, CartId},
    ids::UserId,
    items::LineItem,
    orders::{Order, OrderRequest},
};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;

use crate::{
    api::{ApiError, StorefrontApi},
    config::ClientConfig,
};

/// HTTP client for the storefront JSON API.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    base_url: String,
    http: Client,
}

#[derive(Debug, Serialize)]
struct SaveCartBody {
    items: Vec<LineItem>,
}

impl HttpStorefrontApi {
    /// Create a client for the API at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client for the API at [`ClientConfig::base_url`].
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.as_str())
    }

    /// Create a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn fetch_cart_request(&self, user: UserId) -> RequestBuilder {
        self.http.get(self.url(&format!("/api/cart/{user}")))
    }

    /// Carts are stored without product snapshots; the server re-reads them.
    fn save_cart_request(&self, cart: CartId, items: Vec<LineItem>) -> RequestBuilder {
        let items = items.into_iter().map(LineItem::without_details).collect();

        self.http
            .put(self.url(&format!("/api/cart/{cart}")))
            .json(&SaveCartBody { items })
    }

    fn place_order_request(&self, order: &OrderRequest) -> RequestBuilder {
        self.http.post(self.url("/api/orders")).json(order)
    }

    fn list_orders_request(&self, user: UserId) -> RequestBuilder {
        self.http.get(self.url(&format!("/api/orders/{user}")))
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    debug!(status, body, "storefront request failed");

    Err(ApiError::UnexpectedStatus { status, body })
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn fetch_cart(&self, user: UserId) -> Result<Cart, ApiError> {
        let response = self.fetch_cart_request(user).send().await?;

        Ok(ensure_success(response).await?.json().await?)
    }

    async fn save_cart(&self, cart: CartId, items: Vec<LineItem>) -> Result<Cart, ApiError> {
        let response = self.save_cart_request(cart, items).send().await?;

        Ok(ensure_success(response).await?.json().await?)
    }

    async fn place_order(&self, order: OrderRequest) -> Result<Order, ApiError> {
        let response = self.place_order_request(&order).send().await?;

        Ok(ensure_success(response).await?.json().await?)
    }

    async fn list_orders(&self, user: UserId) -> Result<Vec<Order>, ApiError> {
        let response = self.list_orders_request(user).send().await?;

        Ok(ensure_success(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use dazzle::{checkout::ShippingAddress, orders::PENDING};
    use reqwest::{Method, Request};
    use serde_json::{Value, json};
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::test_support::{item, product};

    use super::*;

    fn api() -> HttpStorefrontApi {
        HttpStorefrontApi::new("http://localhost:8698/")
    }

    fn json_body(request: &Request) -> TestResult<Value> {
        let bytes = request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .ok_or("request has no buffered body")?;

        Ok(serde_json::from_slice(bytes)?)
    }

    #[test]
    fn base_url_comes_from_config() {
        let config = ClientConfig {
            base_url: "https://shop.example.com/".to_string(),
            ..ClientConfig::default()
        };

        let api = HttpStorefrontApi::from_config(&config);

        assert_eq!(api.url("/api/orders"), "https://shop.example.com/api/orders");
    }

    #[test]
    fn fetch_cart_gets_the_user_cart() -> TestResult {
        let request = api().fetch_cart_request(UserId::new(7)).build()?;

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().as_str(), "http://localhost:8698/api/cart/7");
        assert!(request.body().is_none(), "GET should carry no body");

        Ok(())
    }

    #[test]
    fn save_cart_puts_items_without_product_details() -> TestResult {
        let mut with_details = LineItem::new(&product(3, 179_900), 2, Some("M".to_string()), None);
        with_details.color = Some("Indigo".to_string());

        let request = api()
            .save_cart_request(CartId::new(42), vec![with_details, item(5, 1)])
            .build()?;

        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.url().as_str(), "http://localhost:8698/api/cart/42");
        assert_eq!(
            json_body(&request)?,
            json!({
                "items": [
                    { "productId": 3, "quantity": 2, "size": "M", "color": "Indigo" },
                    { "productId": 5, "quantity": 1 }
                ]
            })
        );

        Ok(())
    }

    #[test]
    fn place_order_posts_camel_case_request() -> TestResult {
        let key = Uuid::now_v7();
        let order = OrderRequest {
            user_id: Some(UserId::new(1)),
            items: vec![item(3, 1)],
            status: PENDING.to_string(),
            total_amount: 189_800,
            shipping_address: ShippingAddress::default(),
            payment_method: "upi".to_string(),
            idempotency_key: Some(key),
        };

        let request = api().place_order_request(&order).build()?;
        let body = json_body(&request)?;

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().as_str(), "http://localhost:8698/api/orders");
        assert_eq!(body.get("userId"), Some(&json!(1)));
        assert_eq!(body.get("totalAmount"), Some(&json!(189_800)));
        assert_eq!(body.get("paymentMethod"), Some(&json!("upi")));
        assert_eq!(body.get("idempotencyKey"), Some(&json!(key.to_string())));
        assert_eq!(body.get("items"), Some(&json!([{ "productId": 3, "quantity": 1 }])));

        Ok(())
    }

    #[test]
    fn list_orders_gets_the_user_orders() -> TestResult {
        let request = api().list_orders_request(UserId::new(9)).build()?;

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().as_str(), "http://localhost:8698/api/orders/9");

        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_keeps_status_and_body() -> TestResult {
        let response = http::Response::builder()
            .status(409)
            .body("cart version is stale")?;

        let result = ensure_success(Response::from(response)).await;

        assert!(
            matches!(
                result,
                Err(ApiError::UnexpectedStatus { status: 409, ref body }) if body == "cart version is stale"
            ),
            "expected UnexpectedStatus, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn success_status_passes_through() -> TestResult {
        let response = http::Response::builder().status(201).body("{}")?;

        let response = ensure_success(Response::from(response)).await?;

        assert_eq!(response.status().as_u16(), 201);

        Ok(())
    }
}
