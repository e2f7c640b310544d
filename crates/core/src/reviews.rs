//! Reviews

use serde::{Deserialize, Serialize};

use crate::{
    ids::{TypedId, UserId},
    products::ProductId,
};

/// Review Id
pub type ReviewId = TypedId<Review>;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// Product review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review id
    pub id: ReviewId,

    /// Reviewed product
    pub product_id: ProductId,

    /// Reviewer
    pub user_id: UserId,

    /// Star rating between [`MIN_RATING`] and [`MAX_RATING`]
    pub rating: u8,

    /// Free text
    #[serde(default)]
    pub comment: Option<String>,

    /// Reviewer display name
    #[serde(default)]
    pub user_name: Option<String>,

    /// Reviewer location
    #[serde(default)]
    pub user_location: Option<String>,

    /// Reviewer avatar
    #[serde(default)]
    pub user_image: Option<String>,
}

/// Review submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    /// Reviewed product
    pub product_id: ProductId,

    /// Reviewer
    pub user_id: UserId,

    /// Star rating
    pub rating: u8,

    /// Free text
    #[serde(default)]
    pub comment: Option<String>,

    /// Reviewer display name
    #[serde(default)]
    pub user_name: Option<String>,

    /// Reviewer location
    #[serde(default)]
    pub user_location: Option<String>,

    /// Reviewer avatar
    #[serde(default)]
    pub user_image: Option<String>,
}

impl NewReview {
    /// Whether the rating is within range.
    pub fn has_valid_rating(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.rating)
    }
}

/// Mean of `ratings` rounded half up, 0 when there are none.
pub fn average_rating(ratings: &[u8]) -> u32 {
    if ratings.is_empty() {
        return 0;
    }

    let sum: u64 = ratings.iter().map(|rating| u64::from(*rating)).sum();
    let count = u64::try_from(ratings.len()).unwrap_or(u64::MAX);

    u32::try_from((sum * 2 + count) / (count * 2)).unwrap_or(u32::MAX)
}
