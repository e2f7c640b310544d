//! Category Errors

use salvo::http::StatusError;
use tracing::error;

use dazzle_app::domain::categories::CategoriesServiceError;

pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::NotFound => StatusError::not_found().brief("Category not found"),
        CategoriesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Category already exists")
        }
        CategoriesServiceError::MissingRequiredData | CategoriesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid category")
        }
        CategoriesServiceError::Sql(source) => {
            error!("failed to load categories: {source}");

            StatusError::internal_server_error()
        }
    }
}
