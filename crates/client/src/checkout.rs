//! Order placement from a cart session.

use dazzle::{
    checkout::{CheckoutError, CheckoutForm},
    orders::{Order, OrderRequest},
};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{api::ApiError, notify::Notice, session::CartSession};

/// Why an order was not placed.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The server did not accept the order; the cart is untouched.
    #[error("failed to place order")]
    Api(#[source] ApiError),
}

/// One checkout attempt. Resubmitting the same attempt reuses its
/// idempotency key, so the server creates at most one order for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutAttempt {
    idempotency_key: Uuid,
}

impl Default for CheckoutAttempt {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutAttempt {
    /// Start an attempt with a fresh idempotency key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            idempotency_key: Uuid::now_v7(),
        }
    }

    /// Key sent with every submission of this attempt.
    pub fn idempotency_key(&self) -> Uuid {
        self.idempotency_key
    }

    /// Validate and submit the session's cart as an order.
    ///
    /// On success the cart is cleared and the shopper notified. On failure
    /// the cart is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceOrderError::Checkout`] for an empty cart or invalid form
    /// before any request is made, and [`PlaceOrderError::Api`] when the
    /// server rejects or cannot be reached.
    #[tracing::instrument(
        name = "checkout.place_order",
        skip(self, session, form),
        fields(idempotency_key = %self.idempotency_key, user_id = %session.user_id()),
        err
    )]
    pub async fn place_order(
        &self,
        session: &mut CartSession,
        form: &CheckoutForm,
    ) -> Result<Order, PlaceOrderError> {
        if session.is_empty() {
            session.notifier().notify(Notice::error(
                "Your cart is empty",
                "Please add some items to your cart before checkout.",
            ));

            return Err(CheckoutError::EmptyCart.into());
        }

        let checkout = form.validate()?;

        let request = OrderRequest::from_checkout(
            Some(session.user_id()),
            session.items(),
            checkout,
            session.shipping(),
            Some(self.idempotency_key),
        )?;

        match session.api().place_order(request).await {
            Ok(order) => {
                session.clear_after_order();

                session.notifier().notify(Notice::info(
                    "Order placed successfully!",
                    "Thank you for your purchase.",
                ));

                info!(order_id = %order.id, total_amount = order.total_amount, "order placed");

                Ok(order)
            }
            Err(error) => {
                warn!(%error, "order placement failed");

                session.notifier().notify(Notice::error(
                    "Failed to place order",
                    "Something went wrong. Please try again.",
                ));

                Err(PlaceOrderError::Api(error))
            }
        }
    }
}
