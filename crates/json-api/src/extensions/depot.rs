//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

/// Depot key under which the request logging middleware stores the request id.
pub(crate) const REQUEST_ID_KEY: &str = "request_id";

/// Typed access to values handlers expect in the depot.
pub(crate) trait DepotExt {
    /// Injected value of type `T`, or a 500 when it is missing.
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Id of the request being served, when request logging is installed.
    fn request_id(&self) -> Option<&str>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn request_id(&self) -> Option<&str> {
        self.get::<String>(REQUEST_ID_KEY).ok().map(String::as_str)
    }
}
