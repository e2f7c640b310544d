//! Orders

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    checkout::{CheckoutError, FieldError, PaymentMethod, ShippingAddress, ValidatedCheckout},
    ids::{TypedId, UserId},
    items::LineItem,
    pricing::{ShippingPolicy, calculate_totals},
};

/// Order Id
pub type OrderId = TypedId<Order>;

/// Status assigned to every new order.
pub const PENDING: &str = "pending";

/// Placed order. Line items and totals are a snapshot taken at placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id
    pub id: OrderId,

    /// Placing user, `None` for guest checkouts
    pub user_id: Option<UserId>,

    /// Ordered line items with product snapshots
    pub items: Vec<LineItem>,

    /// Fulfillment status, initially [`PENDING`]
    pub status: String,

    /// Subtotal plus shipping, in paise
    pub total_amount: u64,

    /// Delivery details
    pub shipping_address: ShippingAddress,

    /// Payment method wire name
    pub payment_method: String,

    /// Placement time
    pub created_at: Timestamp,

    /// Client-supplied deduplication key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<Uuid>,
}

/// Body of an order placement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Placing user
    pub user_id: Option<UserId>,

    /// Line items to order
    pub items: Vec<LineItem>,

    /// Requested status, normally [`PENDING`]
    pub status: String,

    /// Total computed by the client
    pub total_amount: u64,

    /// Delivery details
    pub shipping_address: ShippingAddress,

    /// Payment method wire name
    pub payment_method: String,

    /// Deduplication key, one per checkout attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<Uuid>,
}

impl OrderRequest {
    /// Build a placement request from a cart and a validated checkout form.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when `items` is empty.
    pub fn from_checkout(
        user_id: Option<UserId>,
        items: &[LineItem],
        checkout: ValidatedCheckout,
        policy: &ShippingPolicy,
        idempotency_key: Option<Uuid>,
    ) -> Result<Self, CheckoutError> {
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let totals = calculate_totals(items, policy);

        Ok(Self {
            user_id,
            items: items.to_vec(),
            status: PENDING.to_string(),
            total_amount: totals.total,
            shipping_address: checkout.shipping_address,
            payment_method: checkout.payment_method.to_string(),
            idempotency_key,
        })
    }

    /// Check the request as the server receives it: items present and
    /// positive, shipping details complete, payment method known.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there are no items or
    /// [`CheckoutError::InvalidFields`] listing every invalid field.
    pub fn validate(&self) -> Result<PaymentMethod, CheckoutError> {
        if self.items.iter().all(|item| item.quantity == 0) {
            return Err(CheckoutError::EmptyCart);
        }

        let mut errors = self.shipping_address.validate();

        if self.items.iter().any(|item| item.quantity == 0) {
            errors.push(FieldError {
                field: "items",
                message: "every item needs a quantity of at least one",
            });
        }

        let payment_method = self.payment_method.parse::<PaymentMethod>();

        if payment_method.is_err() {
            errors.push(FieldError {
                field: "paymentMethod",
                message: "choose cod, card or upi",
            });
        }

        match payment_method {
            Ok(payment_method) if errors.is_empty() => Ok(payment_method),
            _ => Err(CheckoutError::InvalidFields(errors)),
        }
    }
}
