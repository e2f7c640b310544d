//! Shipping Config

use clap::Args;
use dazzle::pricing::{DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_SHIPPING_FEE, ShippingPolicy};

/// Shipping fee settings, in paise.
#[derive(Debug, Args)]
pub struct ShippingConfig {
    /// Subtotal at or above which shipping is free
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value_t = DEFAULT_FREE_SHIPPING_THRESHOLD)]
    pub free_shipping_threshold: u64,

    /// Flat fee charged below the threshold
    #[arg(long, env = "SHIPPING_FEE", default_value_t = DEFAULT_SHIPPING_FEE)]
    pub shipping_fee: u64,
}

impl ShippingConfig {
    #[must_use]
    pub fn policy(&self) -> ShippingPolicy {
        ShippingPolicy::new(self.free_shipping_threshold, self.shipping_fee)
    }
}
