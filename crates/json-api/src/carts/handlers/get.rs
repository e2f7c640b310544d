//! Get User Cart Handler

use std::sync::Arc;

use dazzle::ids::UserId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Get User Cart Handler
///
/// Returns the user's cart, creating an empty one on first access. Items
/// carry the current product details.
#[endpoint(
    tags("carts"),
    summary = "Get User Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .get_user_cart(UserId::new(user.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
