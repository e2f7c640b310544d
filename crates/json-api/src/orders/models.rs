//! Order Models

use dazzle::{
    checkout::ShippingAddress,
    ids::UserId,
    orders::{Order, OrderRequest, PENDING},
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::carts::models::{LineItemRequest, LineItemResponse};

/// Shipping Address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressBody {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(body: ShippingAddressBody) -> Self {
        ShippingAddress {
            full_name: body.full_name,
            email: body.email,
            phone: body.phone,
            address: body.address,
            city: body.city,
            state: body.state,
            postal_code: body.postal_code,
            additional_notes: body.additional_notes,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        ShippingAddressBody {
            full_name: address.full_name,
            email: address.email,
            phone: address.phone,
            address: address.address,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            additional_notes: address.additional_notes,
        }
    }
}

/// Create Order Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub user_id: Option<i64>,

    pub items: Vec<LineItemRequest>,

    /// Ignored; new orders always start pending
    #[serde(default)]
    pub status: Option<String>,

    /// Client-side total in paise; the server recomputes it
    #[serde(default)]
    pub total_amount: u64,

    pub shipping_address: ShippingAddressBody,

    /// One of `cod`, `card`, `upi`
    pub payment_method: String,

    /// Replaying a key returns the order it created
    #[serde(default)]
    pub idempotency_key: Option<Uuid>,
}

impl From<CreateOrderRequest> for OrderRequest {
    fn from(request: CreateOrderRequest) -> Self {
        OrderRequest {
            user_id: request.user_id.map(UserId::new),
            items: request.items.into_iter().map(Into::into).collect(),
            status: request.status.unwrap_or_else(|| PENDING.to_string()),
            total_amount: request.total_amount,
            shipping_address: request.shipping_address.into(),
            payment_method: request.payment_method,
            idempotency_key: request.idempotency_key,
        }
    }
}

/// Order Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    /// Order id
    pub id: i64,

    pub user_id: Option<i64>,

    /// Line items with the product snapshot taken at placement
    pub items: Vec<LineItemResponse>,

    pub status: String,

    /// Subtotal plus shipping, in paise
    pub total_amount: u64,

    pub shipping_address: ShippingAddressBody,

    pub payment_method: String,

    pub created_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<Uuid>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.into_inner(),
            user_id: order.user_id.map(|user| user.into_inner()),
            items: order.items.into_iter().map(LineItemResponse::from).collect(),
            status: order.status,
            total_amount: order.total_amount,
            shipping_address: order.shipping_address.into(),
            payment_method: order.payment_method,
            created_at: order.created_at.to_string(),
            idempotency_key: order.idempotency_key,
        }
    }
}
