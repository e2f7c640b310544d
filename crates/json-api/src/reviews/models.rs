//! Review Models

use dazzle::{
    ids::UserId,
    products::ProductId,
    reviews::{NewReview, Review},
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Review Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewResponse {
    /// Review id
    pub id: i64,

    /// Reviewed product id
    pub product_id: i64,

    /// Reviewer id
    pub user_id: i64,

    /// Star rating from 1 to 5
    pub rating: u8,

    pub comment: Option<String>,

    pub user_name: Option<String>,

    pub user_location: Option<String>,

    pub user_image: Option<String>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.into_inner(),
            product_id: review.product_id.into_inner(),
            user_id: review.user_id.into_inner(),
            rating: review.rating,
            comment: review.comment,
            user_name: review.user_name,
            user_location: review.user_location,
            user_image: review.user_image,
        }
    }
}

/// Create Review Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateReviewRequest {
    pub product_id: i64,

    pub user_id: i64,

    /// Star rating from 1 to 5
    pub rating: u8,

    pub comment: Option<String>,

    pub user_name: Option<String>,

    pub user_location: Option<String>,

    pub user_image: Option<String>,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        NewReview {
            product_id: ProductId::new(request.product_id),
            user_id: UserId::new(request.user_id),
            rating: request.rating,
            comment: request.comment,
            user_name: request.user_name,
            user_location: request.user_location,
            user_image: request.user_image,
        }
    }
}
