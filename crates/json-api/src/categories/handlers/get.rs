//! Get Category Handler

use std::sync::Arc;

use dazzle::products::CategoryId;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    categories::{errors::into_status_error, models::CategoryResponse},
    extensions::*,
    state::State,
};

/// Get Category Handler
#[endpoint(
    tags("categories"),
    summary = "Get Category",
    responses(
        (status_code = StatusCode::OK, description = "Category found"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .get_category(CategoryId::new(category.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}
