//! User Orders Handler

use std::sync::Arc;

use dazzle::ids::UserId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// User Orders Handler
///
/// Returns the user's orders, newest first.
#[endpoint(tags("orders"), summary = "List User Orders")]
pub(crate) async fn handler(
    user: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders(UserId::new(user.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
