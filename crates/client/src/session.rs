//! Cart Session
//!
//! Owns the shopper's [`CartStore`] and mirrors it to the server. Every
//! mutation is applied locally first, then published to the [`CartSync`]
//! worker once the server cart is known.

use std::{sync::Arc, time::Duration};

use dazzle::{
    cart::{Cart, CartChange, CartId, CartStore},
    ids::UserId,
    items::LineItem,
    pricing::{ShippingPolicy, Totals},
    products::{Product, ProductId},
};
use tracing::{info, warn};

use crate::{
    api::{ApiError, StorefrontApi},
    config::ClientConfig,
    notify::{Notice, Notifier},
    sync::CartSync,
};

/// A shopper's cart, kept in step with the server.
pub struct CartSession {
    user_id: UserId,
    shipping: ShippingPolicy,
    debounce: Duration,
    store: CartStore,
    sync: Option<CartSync>,
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn Notifier>,
}

impl CartSession {
    /// Create a session with an empty local cart. Call [`hydrate`](Self::hydrate)
    /// to load the server copy and start syncing.
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        notifier: Arc<dyn Notifier>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            user_id: config.user_id,
            shipping: config.shipping,
            debounce: config.sync_debounce,
            store: CartStore::new(),
            sync: None,
            api,
            notifier,
        }
    }

    /// Fetch (or create) the user's server cart and adopt its items,
    /// replacing anything added locally in the meantime.
    ///
    /// # Errors
    ///
    /// Returns the API error after notifying the shopper. The local cart is
    /// left untouched and unsynced.
    pub async fn hydrate(&mut self) -> Result<CartId, ApiError> {
        let cart = match self.api.fetch_cart(self.user_id).await {
            Ok(cart) => cart,
            Err(error) => {
                warn!(user_id = %self.user_id, %error, "failed to load cart");

                self.notifier.notify(Notice::error(
                    "Error",
                    "Failed to load your cart. Please try again.",
                ));

                return Err(error);
            }
        };

        let Cart { id, items, .. } = cart;

        self.store.replace_items(items);

        if let Some(previous) = self.sync.take() {
            previous.shutdown().await;
        }

        self.sync = Some(CartSync::spawn(
            Arc::clone(&self.api),
            Arc::clone(&self.notifier),
            id,
            self.debounce,
        ));

        info!(cart_id = %id, items = self.store.len(), "cart loaded");

        Ok(id)
    }

    /// The shopper.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Server cart id, once hydrated.
    pub fn cart_id(&self) -> Option<CartId> {
        self.sync.as_ref().map(CartSync::cart)
    }

    /// Current line items, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.store.items()
    }

    /// Whether the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Sum of item quantities.
    pub fn total_items(&self) -> u64 {
        self.store.total_items()
    }

    /// Sum of line totals before shipping, in paise.
    pub fn subtotal(&self) -> u64 {
        self.store.subtotal()
    }

    /// Subtotal, shipping and total under the configured policy.
    pub fn totals(&self) -> Totals {
        self.store.totals(&self.shipping)
    }

    pub(crate) fn shipping(&self) -> &ShippingPolicy {
        &self.shipping
    }

    pub(crate) fn api(&self) -> &dyn StorefrontApi {
        self.api.as_ref()
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Add `quantity` of `product`, merging with a matching size and color.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> CartChange {
        let change = self.store.add_item(product, quantity, size, color);

        match change {
            CartChange::Added => self.notifier.notify(Notice::info(
                "Item added",
                format!("{} has been added to your cart", product.name),
            )),
            CartChange::Merged(_) => self.notifier.notify(Notice::info(
                "Cart updated",
                format!("Updated quantity of {}", product.name),
            )),
            _ => {}
        }

        self.publish(change)
    }

    /// Remove every size and color of `product`.
    pub fn remove_item(&mut self, product: ProductId) -> CartChange {
        let change = self.store.remove_item(product);

        if change.is_change() {
            self.notifier.notify(Notice::info(
                "Item removed",
                "Item has been removed from your cart",
            ));
        }

        self.publish(change)
    }

    /// Set the quantity of every item for `product`; zero or less removes it.
    pub fn update_quantity(&mut self, product: ProductId, quantity: i64) -> CartChange {
        if quantity <= 0 {
            return self.remove_item(product);
        }

        let change = self.store.update_quantity(product, quantity);

        self.publish(change)
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> CartChange {
        let change = self.store.clear();

        if change.is_change() {
            self.notifier.notify(Notice::info(
                "Cart cleared",
                "All items have been removed from your cart",
            ));
        }

        self.publish(change)
    }

    /// Empty the cart after an order was placed.
    pub(crate) fn clear_after_order(&mut self) {
        let change = self.store.clear();

        self.publish(change);
    }

    /// Push the current items immediately, bypassing the debounce.
    ///
    /// Returns `None` before the session is hydrated.
    ///
    /// # Errors
    ///
    /// Returns the API error; the local cart is unchanged.
    pub async fn sync_now(&self) -> Result<Option<Cart>, ApiError> {
        let Some(cart) = self.cart_id() else {
            return Ok(None);
        };

        self.api
            .save_cart(cart, self.store.items().to_vec())
            .await
            .map(Some)
    }

    /// Stop syncing, flushing any pending change first.
    pub async fn close(mut self) {
        if let Some(sync) = self.sync.take() {
            sync.shutdown().await;
        }
    }

    fn publish(&self, change: CartChange) -> CartChange {
        if change.is_change()
            && let Some(sync) = &self.sync
        {
            sync.publish(self.store.items().to_vec());
        }

        change
    }
}

impl std::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("user_id", &self.user_id)
            .field("cart_id", &self.cart_id())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
