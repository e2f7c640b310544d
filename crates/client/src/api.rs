//! Storefront API seam

use async_trait::async_trait;
use dazzle::{
    cart::{Cart, CartId},
    ids::UserId,
    items::LineItem,
    orders::{Order, OrderRequest},
};
use mockall::automock;
use thiserror::Error;

/// Errors talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or an undecodable body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected response status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,

        /// Response body, possibly empty
        body: String,
    },
}

/// The subset of the storefront API a cart session needs.
#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Fetch the user's cart, creating it if needed.
    async fn fetch_cart(&self, user: UserId) -> Result<Cart, ApiError>;

    /// Replace the cart's items.
    async fn save_cart(&self, cart: CartId, items: Vec<LineItem>) -> Result<Cart, ApiError>;

    /// Place an order.
    async fn place_order(&self, order: OrderRequest) -> Result<Order, ApiError>;

    /// The user's orders, newest first.
    async fn list_orders(&self, user: UserId) -> Result<Vec<Order>, ApiError>;
}
