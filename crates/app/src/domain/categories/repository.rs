//! Categories Repository

use dazzle::products::{Category, CategoryId};
use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query};

use crate::domain::categories::models::NewCategory;

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        query(LIST_CATEGORIES_SQL)
            .try_map(category_from_row)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryId,
    ) -> Result<Category, sqlx::Error> {
        query(GET_CATEGORY_SQL)
            .bind(category.into_inner())
            .try_map(category_from_row)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: NewCategory,
    ) -> Result<Category, sqlx::Error> {
        query(CREATE_CATEGORY_SQL)
            .bind(category.name)
            .bind(category.description)
            .bind(category.image_url)
            .try_map(category_from_row)
            .fetch_one(&mut **tx)
            .await
    }
}

fn category_from_row(row: PgRow) -> sqlx::Result<Category> {
    Ok(Category {
        id: CategoryId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
    })
}
