//! Create Review Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    reviews::{
        errors::into_status_error,
        models::{CreateReviewRequest, ReviewResponse},
    },
    state::State,
};

/// Create Review Handler
///
/// Stores the review and refreshes the product's rating.
#[endpoint(
    tags("reviews"),
    summary = "Create Review",
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let review = state
        .app
        .reviews
        .create_review(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(review.into()))
}

#[cfg(test)]
mod tests {
    use dazzle::products::ProductId;
    use dazzle_app::domain::reviews::{MockReviewsService, ReviewsServiceError};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{make_review, reviews_service};

    use super::*;

    fn make_service(reviews: MockReviewsService) -> Service {
        reviews_service(reviews, Router::with_path("api/reviews").post(handler))
    }

    #[tokio::test]
    async fn test_create_review_returns_201() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_create_review()
            .once()
            .withf(|review| {
                review.product_id == ProductId::new(3)
                    && review.rating == 4
                    && review.user_name.as_deref() == Some("Priya")
            })
            .return_once(|_| Ok(make_review(9, 3, 4)));

        reviews.expect_list_reviews().never();

        let mut res = TestClient::post("http://example.com/api/reviews")
            .json(&json!({
                "productId": 3,
                "userId": 1,
                "rating": 4,
                "comment": "Lovely fabric",
                "userName": "Priya"
            }))
            .send(&make_service(reviews))
            .await;

        let body: ReviewResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.id, 9);
        assert_eq!(body.product_id, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_review_bad_rating_returns_400() {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_create_review()
            .once()
            .return_once(|_| Err(ReviewsServiceError::InvalidRating));

        reviews.expect_list_reviews().never();

        let res = TestClient::post("http://example.com/api/reviews")
            .json(&json!({ "productId": 3, "userId": 1, "rating": 9 }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_review_unknown_product_returns_404() {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_create_review()
            .once()
            .return_once(|_| Err(ReviewsServiceError::ProductNotFound));

        reviews.expect_list_reviews().never();

        let res = TestClient::post("http://example.com/api/reviews")
            .json(&json!({ "productId": 404, "userId": 1, "rating": 3 }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
