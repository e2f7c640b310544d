//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use dazzle_app::domain::carts::CartsServiceError;

use crate::observability::record_cart_version_conflict;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::VersionConflict { current } => {
            record_cart_version_conflict();

            StatusError::conflict().brief(format!(
                "Cart was changed elsewhere (now at version {current}); reload and retry"
            ))
        }
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists"),
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart items")
        }
        CartsServiceError::Sql(source) => {
            error!("failed to access cart: {source}");

            StatusError::internal_server_error()
        }
    }
}
