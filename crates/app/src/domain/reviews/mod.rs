//! Reviews

pub mod errors;
mod repository;
pub mod service;

pub use errors::ReviewsServiceError;
pub use service::*;
