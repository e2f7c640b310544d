//! Category Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    categories::{errors::into_status_error, models::CategoryResponse},
    extensions::*,
    state::State,
};

/// Category Index Handler
///
/// Returns all categories in creation order.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}
