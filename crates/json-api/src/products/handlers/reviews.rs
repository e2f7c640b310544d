//! Product Reviews Handler

use std::sync::Arc;

use dazzle::products::ProductId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewResponse},
    state::State,
};

/// Product Reviews Handler
///
/// Returns a product's reviews, oldest first.
#[endpoint(tags("products", "reviews"), summary = "List Product Reviews")]
pub(crate) async fn handler(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Vec<ReviewResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reviews = state
        .app
        .reviews
        .list_reviews(ProductId::new(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}
