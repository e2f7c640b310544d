//! Client configuration

use std::time::Duration;

use dazzle::{ids::UserId, pricing::ShippingPolicy};

/// Quiet period before a cart change is pushed to the server.
pub const DEFAULT_SYNC_DEBOUNCE: Duration = Duration::from_millis(300);

/// Settings for a [`CartSession`](crate::session::CartSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Storefront API origin, e.g. `http://localhost:8698`
    pub base_url: String,

    /// Shopper whose cart the session mirrors
    pub user_id: UserId,

    /// Quiet period before pushing cart changes
    pub sync_debounce: Duration,

    /// Shipping policy used for client-side totals
    pub shipping: ShippingPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8698".to_string(),
            user_id: UserId::new(1),
            sync_debounce: DEFAULT_SYNC_DEBOUNCE,
            shipping: ShippingPolicy::default(),
        }
    }
}
