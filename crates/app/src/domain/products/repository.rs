//! Products Repository

use std::collections::HashMap;

use dazzle::{
    items::LineItem,
    products::{CategoryId, Product, ProductId},
};
use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query};

use crate::domain::{
    columns::{amount_to_db, try_get_amount, try_get_count},
    products::models::{NewProduct, ProductFilter},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCTS_BY_IDS_SQL: &str = include_str!("sql/get_products_by_ids.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query(LIST_PRODUCTS_SQL)
            .bind(filter.category.map(CategoryId::into_inner))
            .bind(filter.featured)
            .bind(filter.new_arrivals)
            .bind(filter.search_pattern())
            .try_map(product_from_row)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Product, sqlx::Error> {
        query(GET_PRODUCT_SQL)
            .bind(product.into_inner())
            .try_map(product_from_row)
            .fetch_one(&mut **tx)
            .await
    }

    /// Products matching any of `products`, in no particular order. Unknown ids are skipped.
    pub(crate) async fn get_products_by_ids(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductId],
    ) -> Result<Vec<Product>, sqlx::Error> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = products.iter().copied().map(ProductId::into_inner).collect();

        query(GET_PRODUCTS_BY_IDS_SQL)
            .bind(ids)
            .try_map(product_from_row)
            .fetch_all(&mut **tx)
            .await
    }

    /// Replace each item's product snapshot with the current product row.
    ///
    /// Items whose product no longer exists are left without details.
    pub(crate) async fn load_product_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &mut [LineItem],
    ) -> Result<(), sqlx::Error> {
        let mut ids: Vec<ProductId> = items.iter().map(|item| item.product_id).collect();

        ids.sort_unstable();
        ids.dedup();

        let products: HashMap<ProductId, Product> = self
            .get_products_by_ids(tx, &ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        for item in items {
            item.product_details = products.get(&item.product_id).cloned();
        }

        Ok(())
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        let price = amount_to_db(product.price, "price")?;

        let discounted_price = product
            .discounted_price
            .map(|amount| amount_to_db(amount, "discounted_price"))
            .transpose()?;

        query(CREATE_PRODUCT_SQL)
            .bind(product.name)
            .bind(product.description)
            .bind(price)
            .bind(discounted_price)
            .bind(product.category_id.into_inner())
            .bind(product.image_urls)
            .bind(product.sizes)
            .bind(product.colors)
            .bind(product.in_stock)
            .bind(product.is_featured)
            .bind(product.is_new_arrival)
            .try_map(product_from_row)
            .fetch_one(&mut **tx)
            .await
    }
}

pub(crate) fn product_from_row(row: PgRow) -> sqlx::Result<Product> {
    let discounted_price = match row.try_get::<Option<i64>, _>("discounted_price")? {
        Some(_) => Some(try_get_amount(&row, "discounted_price")?),
        None => None,
    };

    Ok(Product {
        id: ProductId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: try_get_amount(&row, "price")?,
        discounted_price,
        category_id: CategoryId::new(row.try_get("category_id")?),
        image_urls: row.try_get("image_urls")?,
        sizes: row.try_get("sizes")?,
        colors: row.try_get("colors")?,
        in_stock: row.try_get("in_stock")?,
        is_featured: row.try_get("is_featured")?,
        is_new_arrival: row.try_get("is_new_arrival")?,
        average_rating: try_get_count(&row, "average_rating")?,
        review_count: try_get_count(&row, "review_count")?,
    })
}
