//! API Router

use salvo::Router;

use crate::{carts, categories, orders, products, reviews};

/// Storefront routes under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .push(Router::with_path("reviews").get(products::reviews::handler)),
                ),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(Router::with_path("{category}").get(categories::get::handler)),
        )
        .push(Router::with_path("reviews").post(reviews::create::handler))
        .push(Router::with_path("cart/{user}").get(carts::get::handler))
        .push(Router::with_path("cart/{cart}").put(carts::update::handler))
        .push(
            Router::with_path("orders")
                .post(orders::create::handler)
                .push(Router::with_path("{user}").get(orders::index::handler))
                .push(Router::with_path("{order}/status").put(orders::status::handler)),
        )
}
