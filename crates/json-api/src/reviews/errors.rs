//! Review Errors

use salvo::http::StatusError;
use tracing::error;

use dazzle_app::domain::reviews::ReviewsServiceError;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        ReviewsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Review already exists")
        }
        ReviewsServiceError::InvalidRating => {
            StatusError::bad_request().brief("Rating must be between 1 and 5")
        }
        ReviewsServiceError::MissingRequiredData | ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid review")
        }
        ReviewsServiceError::Sql(source) => {
            error!("failed to access reviews: {source}");

            StatusError::internal_server_error()
        }
    }
}
