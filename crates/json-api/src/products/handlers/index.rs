//! Product Index Handler

use std::sync::Arc;

use dazzle::products::CategoryId;
use dazzle_app::domain::products::models::ProductFilter;
use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

fn flag(req: &Request, name: &str) -> Result<bool, StatusError> {
    req.queries()
        .get(name)
        .map(|value| value.parse::<bool>())
        .transpose()
        .or_400(&format!("could not parse \"{name}\" query parameter"))
        .map(Option::unwrap_or_default)
}

fn product_filter(req: &Request) -> Result<ProductFilter, StatusError> {
    let category = req
        .queries()
        .get("category")
        .map(|value| value.parse::<CategoryId>())
        .transpose()
        .or_400("could not parse \"category\" query parameter")?;

    Ok(ProductFilter {
        category,
        featured: flag(req, "featured")?,
        new_arrivals: flag(req, "newArrivals")?,
        search: req.queries().get("search").cloned(),
    })
}

/// Product Index Handler
///
/// Returns products matching every given filter, in catalog order.
#[endpoint(
    tags("products"),
    summary = "List Products",
    parameters(
        ("category" = Option<i64>, Query, description = "Only products in this category"),
        ("featured" = Option<bool>, Query, description = "Only featured products"),
        ("newArrivals" = Option<bool>, Query, description = "Only new arrivals"),
        ("search" = Option<String>, Query, description = "Case-insensitive name or description substring"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let filter = product_filter(req)?;

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}
