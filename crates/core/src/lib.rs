//! Dazzle
//!
//! Shared storefront domain types together with the client-side cart store,
//! pricing rules and checkout validation used by both the server and client.

pub mod cart;
pub mod checkout;
pub mod ids;
pub mod items;
pub mod orders;
pub mod pricing;
pub mod products;
pub mod reviews;
