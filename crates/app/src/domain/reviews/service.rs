//! Reviews service.

use async_trait::async_trait;
use dazzle::{
    products::ProductId,
    reviews::{NewReview, Review, average_rating},
};
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::reviews::{errors::ReviewsServiceError, repository::PgReviewsRepository},
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn list_reviews(&self, product: ProductId) -> Result<Vec<Review>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_product_reviews(&mut tx, product).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    #[tracing::instrument(
        name = "reviews.service.create_review",
        skip(self, review),
        fields(product_id = %review.product_id, rating = review.rating),
        err
    )]
    async fn create_review(&self, review: NewReview) -> Result<Review, ReviewsServiceError> {
        if !review.has_valid_rating() {
            return Err(ReviewsServiceError::InvalidRating);
        }

        let product = review.product_id;

        let mut tx = self.db.begin().await?;

        self.repository.lock_product(&mut tx, product).await?;

        let created = self.repository.create_review(&mut tx, review).await?;

        let ratings = self.repository.list_product_ratings(&mut tx, product).await?;

        let average = average_rating(&ratings);

        self.repository
            .update_product_rating(&mut tx, product, average, ratings.len())
            .await?;

        tx.commit().await?;

        info!(
            review_id = %created.id,
            average_rating = average,
            review_count = ratings.len(),
            "created review"
        );

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Retrieve a product's reviews, oldest first.
    async fn list_reviews(&self, product: ProductId) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Create a review and recompute the product's rating in the same transaction.
    async fn create_review(&self, review: NewReview) -> Result<Review, ReviewsServiceError>;
}
