//! Pricing

use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};

use crate::items::LineItem;

/// Subtotal at or above which shipping is free (₹1,999).
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: u64 = 199_900;

/// Flat shipping fee charged below the threshold (₹99).
pub const DEFAULT_SHIPPING_FEE: u64 = 9_900;

/// Shipping fee rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Subtotal at or above which shipping is free
    pub free_shipping_threshold: u64,

    /// Fee charged below the threshold
    pub flat_fee: u64,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
            flat_fee: DEFAULT_SHIPPING_FEE,
        }
    }
}

impl ShippingPolicy {
    /// Create a policy with the given threshold and fee.
    pub fn new(free_shipping_threshold: u64, flat_fee: u64) -> Self {
        Self {
            free_shipping_threshold,
            flat_fee,
        }
    }

    /// Shipping fee for the given subtotal.
    pub fn shipping_fee(&self, subtotal: u64) -> u64 {
        if subtotal >= self.free_shipping_threshold {
            0
        } else {
            self.flat_fee
        }
    }
}

/// Derived cart totals, all in paise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of line totals
    pub subtotal: u64,

    /// Shipping fee
    pub shipping_fee: u64,

    /// Subtotal plus shipping
    pub total: u64,
}

/// Sum of unit price × quantity over `items`.
pub fn subtotal(items: &[LineItem]) -> u64 {
    items
        .iter()
        .map(LineItem::line_total)
        .fold(0, u64::saturating_add)
}

/// Calculate subtotal, shipping and total for `items`.
pub fn calculate_totals(items: &[LineItem], policy: &ShippingPolicy) -> Totals {
    let subtotal = subtotal(items);
    let shipping_fee = policy.shipping_fee(subtotal);

    Totals {
        subtotal,
        shipping_fee,
        total: subtotal.saturating_add(shipping_fee),
    }
}

/// Percentage off the reference price, rounded half up.
///
/// Returns 0 when either price is zero or missing, or the reference is not above the price.
pub fn discount_percentage(price: u64, reference: Option<u64>) -> u64 {
    let Some(reference) = reference.filter(|reference| *reference > 0) else {
        return 0;
    };

    if price == 0 || reference <= price {
        return 0;
    }

    let saved = u128::from(reference - price) * 100;
    let reference = u128::from(reference);
    let rounded = (saved * 2 + reference) / (reference * 2);

    u64::try_from(rounded).unwrap_or(100)
}

/// Render an amount in paise as whole rupees, e.g. `₹1,799`.
///
/// Paise are rounded half up before formatting.
pub fn format_price(amount: u64) -> String {
    let rupees = amount.saturating_add(50) / 100;
    let minor = i64::try_from(rupees.saturating_mul(100)).unwrap_or(i64::MAX);
    let money = Money::from_minor(minor, iso::INR).to_string();

    match money.split_once('.') {
        Some((whole, _)) => whole.to_string(),
        None => money,
    }
}
