//! Cart Models

use dazzle::{cart::Cart, items::LineItem, products::ProductId};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::products::models::ProductResponse;

/// Line item as sent by clients. Product details are never trusted from input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LineItemRequest {
    pub product_id: i64,

    /// Units of the product; zero drops the line
    pub quantity: u32,

    pub size: Option<String>,

    pub color: Option<String>,
}

impl From<LineItemRequest> for LineItem {
    fn from(item: LineItemRequest) -> Self {
        LineItem {
            product_id: ProductId::new(item.product_id),
            quantity: item.quantity,
            size: item.size,
            color: item.color,
            product_details: None,
        }
    }
}

/// Line Item Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LineItemResponse {
    pub product_id: i64,

    pub quantity: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Current product snapshot, absent when the product no longer exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_details: Option<ProductResponse>,
}

impl From<LineItem> for LineItemResponse {
    fn from(item: LineItem) -> Self {
        Self {
            product_id: item.product_id.into_inner(),
            quantity: item.quantity,
            size: item.size,
            color: item.color,
            product_details: item.product_details.map(ProductResponse::from),
        }
    }
}

/// Cart Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// Cart id
    pub id: i64,

    /// Owning user, absent for guest carts
    pub user_id: Option<i64>,

    pub items: Vec<LineItemResponse>,

    /// Incremented on every write; send back as `expectedVersion`
    pub version: i64,

    pub created_at: String,

    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id.into_inner(),
            user_id: cart.user_id.map(|user| user.into_inner()),
            items: cart.items.into_iter().map(LineItemResponse::from).collect(),
            version: cart.version,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}
