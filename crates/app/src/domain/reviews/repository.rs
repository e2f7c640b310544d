//! Reviews Repository

use dazzle::{
    ids::UserId,
    products::ProductId,
    reviews::{NewReview, Review, ReviewId},
};
use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query, query_scalar};

const LIST_PRODUCT_REVIEWS_SQL: &str = include_str!("sql/list_product_reviews.sql");
const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const LIST_PRODUCT_RATINGS_SQL: &str = include_str!("sql/list_product_ratings.sql");
const UPDATE_PRODUCT_RATING_SQL: &str = include_str!("sql/update_product_rating.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_product_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query(LIST_PRODUCT_REVIEWS_SQL)
            .bind(product.into_inner())
            .try_map(review_from_row)
            .fetch_all(&mut **tx)
            .await
    }

    /// Lock the product row so concurrent reviews recompute ratings in turn.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_PRODUCT_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: NewReview,
    ) -> Result<Review, sqlx::Error> {
        query(CREATE_REVIEW_SQL)
            .bind(review.product_id.into_inner())
            .bind(review.user_id.into_inner())
            .bind(i16::from(review.rating))
            .bind(review.comment)
            .bind(review.user_name)
            .bind(review.user_location)
            .bind(review.user_image)
            .try_map(review_from_row)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_product_ratings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Vec<u8>, sqlx::Error> {
        let ratings: Vec<i16> = query_scalar(LIST_PRODUCT_RATINGS_SQL)
            .bind(product.into_inner())
            .fetch_all(&mut **tx)
            .await?;

        ratings
            .into_iter()
            .map(|rating| {
                u8::try_from(rating).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "rating".to_string(),
                    source: Box::new(e),
                })
            })
            .collect()
    }

    pub(crate) async fn update_product_rating(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        average_rating: u32,
        review_count: usize,
    ) -> Result<(), sqlx::Error> {
        let average_rating = i32::try_from(average_rating).map_err(|e| sqlx::Error::ColumnDecode {
            index: "average_rating".to_string(),
            source: Box::new(e),
        })?;

        let review_count = i32::try_from(review_count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "review_count".to_string(),
            source: Box::new(e),
        })?;

        query(UPDATE_PRODUCT_RATING_SQL)
            .bind(product.into_inner())
            .bind(average_rating)
            .bind(review_count)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn review_from_row(row: PgRow) -> sqlx::Result<Review> {
    let rating: i16 = row.try_get("rating")?;

    let rating = u8::try_from(rating).map_err(|e| sqlx::Error::ColumnDecode {
        index: "rating".to_string(),
        source: Box::new(e),
    })?;

    Ok(Review {
        id: ReviewId::new(row.try_get("id")?),
        product_id: ProductId::new(row.try_get("product_id")?),
        user_id: UserId::new(row.try_get("user_id")?),
        rating,
        comment: row.try_get("comment")?,
        user_name: row.try_get("user_name")?,
        user_location: row.try_get("user_location")?,
        user_image: row.try_get("user_image")?,
    })
}
