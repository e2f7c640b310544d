//! Update Cart Handler

use std::sync::Arc;

use dazzle::cart::CartId;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{
        errors::into_status_error,
        models::{CartResponse, LineItemRequest},
    },
    extensions::*,
    state::State,
};

/// Update Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateCartRequest {
    /// Full replacement item list
    pub items: Vec<LineItemRequest>,

    /// Reject the write unless the stored cart is at this version
    #[serde(default)]
    pub expected_version: Option<i64>,
}

/// Update Cart Handler
///
/// Replaces the cart's items. Without `expectedVersion` the last write wins.
#[endpoint(
    tags("carts"),
    summary = "Replace Cart Items",
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::CONFLICT, description = "Stale cart version"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<i64>,
    json: JsonBody<UpdateCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let UpdateCartRequest {
        items,
        expected_version,
    } = json.into_inner();

    let cart = state
        .app
        .carts
        .replace_items(
            CartId::new(cart.into_inner()),
            items.into_iter().map(Into::into).collect(),
            expected_version,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
