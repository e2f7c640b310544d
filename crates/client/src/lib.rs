//! Storefront client session: cart state mirrored to the server, and checkout.

pub mod api;
pub mod checkout;
pub mod config;
pub mod http;
pub mod notify;
pub mod session;
pub mod sync;

#[cfg(test)]
mod test_support;
