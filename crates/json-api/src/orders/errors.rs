//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use dazzle_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidOrder(_)
        | OrdersServiceError::UnknownProducts(_)
        | OrdersServiceError::InvalidStatus => StatusError::bad_request().brief(error.to_string()),
        OrdersServiceError::MissingRequiredData | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order data")
        }
        OrdersServiceError::Sql(source) => {
            error!("failed to access orders: {source}");

            StatusError::internal_server_error()
        }
    }
}
