//! Test context for service-level integration tests.

use dazzle::pricing::ShippingPolicy;

use crate::{
    database::Db,
    domain::{
        carts::PgCartsService, categories::PgCategoriesService, orders::PgOrdersService,
        products::PgProductsService, reviews::PgReviewsService,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub products: PgProductsService,
    pub categories: PgCategoriesService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
    pub reviews: PgReviewsService,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_shipping(ShippingPolicy::default()).await
    }

    /// Build a context whose order service charges shipping per `shipping`.
    pub async fn with_shipping(shipping: ShippingPolicy) -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            products: PgProductsService::new(db.clone()),
            categories: PgCategoriesService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone(), shipping),
            reviews: PgReviewsService::new(db),
            db: test_db,
        }
    }
}
