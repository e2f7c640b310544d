//! Storefront Domain Concerns

pub mod carts;
pub mod categories;
mod columns;
pub mod orders;
pub mod products;
pub mod reviews;
