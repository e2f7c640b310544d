//! Carts service.

use async_trait::async_trait;
use dazzle::{
    cart::{Cart, CartId, CartStore},
    ids::UserId,
    items::LineItem,
};
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{errors::CartsServiceError, repository::PgCartsRepository},
        products::repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_user_cart(&self, user: UserId) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .carts_repository
            .get_or_create_user_cart(&mut tx, user)
            .await?;

        self.products_repository
            .load_product_details(&mut tx, &mut cart.items)
            .await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn replace_items(
        &self,
        cart: CartId,
        items: Vec<LineItem>,
        expected_version: Option<i64>,
    ) -> Result<Cart, CartsServiceError> {
        let items: Vec<LineItem> = CartStore::with_items(items)
            .items()
            .iter()
            .cloned()
            .map(LineItem::without_details)
            .collect();

        let mut tx = self.db.begin().await?;

        let updated = self
            .carts_repository
            .replace_cart_items(&mut tx, cart, &items, expected_version)
            .await?;

        let Some(mut updated) = updated else {
            let current = self.carts_repository.get_cart_version(&mut tx, cart).await?;

            return match current {
                Some(current) => {
                    debug!(%cart, current, ?expected_version, "rejected stale cart write");

                    Err(CartsServiceError::VersionConflict { current })
                }
                None => Err(CartsServiceError::NotFound),
            };
        };

        self.products_repository
            .load_product_details(&mut tx, &mut updated.items)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart, creating an empty one on first access.
    ///
    /// Items carry the current product details.
    async fn get_user_cart(&self, user: UserId) -> Result<Cart, CartsServiceError>;

    /// Overwrite the cart's items.
    ///
    /// Zero-quantity items are dropped and duplicate (product, size, color)
    /// entries merged. When `expected_version` is given and differs from the
    /// stored version the write is rejected with
    /// [`CartsServiceError::VersionConflict`].
    async fn replace_items(
        &self,
        cart: CartId,
        items: Vec<LineItem>,
        expected_version: Option<i64>,
    ) -> Result<Cart, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{create_category, create_product, line_item},
    };

    use super::*;

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn get_user_cart_creates_once() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserId::new(7);

        let first = ctx.carts.get_user_cart(user).await?;
        let second = ctx.carts.get_user_cart(user).await?;

        assert_eq!(first.id, second.id);
        assert_eq!(first.user_id, Some(user));
        assert!(first.items.is_empty());
        assert_eq!(first.version, 0);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn replace_items_normalises_and_enriches() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Casual Kurtis").await?;
        let kurti = create_product(&ctx, category.id, "Casual Cotton Kurti", 129_900).await?;

        let cart = ctx.carts.get_user_cart(UserId::new(1)).await?;

        let updated = ctx
            .carts
            .replace_items(
                cart.id,
                vec![
                    line_item(kurti.id, 1, Some("M")),
                    line_item(kurti.id, 2, Some("M")),
                    line_item(kurti.id, 0, Some("S")),
                ],
                None,
            )
            .await?;

        assert_eq!(updated.version, 1);
        assert_eq!(updated.items.len(), 1);

        let item = updated.items.first().ok_or("missing item")?;

        assert_eq!(item.quantity, 3);
        assert_eq!(item.product_details.as_ref().map(|p| p.price), Some(129_900));

        let fetched = ctx.carts.get_user_cart(UserId::new(1)).await?;

        assert_eq!(fetched.items, updated.items);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn replace_items_with_empty_list_clears_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Festive Kurtis").await?;
        let kurti = create_product(&ctx, category.id, "Royal Silk Kurti", 349_900).await?;

        let cart = ctx.carts.get_user_cart(UserId::new(2)).await?;

        ctx.carts
            .replace_items(cart.id, vec![line_item(kurti.id, 1, None)], None)
            .await?;

        let cleared = ctx.carts.replace_items(cart.id, Vec::new(), None).await?;

        assert!(cleared.items.is_empty());
        assert_eq!(cleared.version, 2);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn stale_version_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = ctx.carts.get_user_cart(UserId::new(3)).await?;

        ctx.carts.replace_items(cart.id, Vec::new(), Some(0)).await?;

        let result = ctx.carts.replace_items(cart.id, Vec::new(), Some(0)).await;

        assert!(
            matches!(result, Err(CartsServiceError::VersionConflict { current: 1 })),
            "expected VersionConflict, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn replace_items_on_unknown_cart_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .replace_items(CartId::new(404), Vec::new(), None)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn items_for_missing_products_have_no_details() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = ctx.carts.get_user_cart(UserId::new(4)).await?;

        let updated = ctx
            .carts
            .replace_items(
                cart.id,
                vec![line_item(dazzle::products::ProductId::new(999), 1, None)],
                None,
            )
            .await?;

        assert!(
            updated.items.iter().all(|item| item.product_details.is_none()),
            "unknown products should stay unresolved"
        );

        Ok(())
    }
}
