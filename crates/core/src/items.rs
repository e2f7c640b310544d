//! Line Items

use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

/// One product selection in a cart or order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Referenced product
    pub product_id: ProductId,

    /// Number of units, at least one while the item is in a cart
    pub quantity: u32,

    /// Chosen size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Chosen color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Product snapshot taken when the item was read; not part of the item's identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_details: Option<Product>,
}

/// Deduplication key for line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineItemKey<'a> {
    /// Product id
    pub product_id: ProductId,

    /// Size, if chosen
    pub size: Option<&'a str>,

    /// Color, if chosen
    pub color: Option<&'a str>,
}

impl LineItem {
    /// Create a line item carrying a snapshot of `product`.
    pub fn new(
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> Self {
        Self {
            product_id: product.id,
            quantity,
            size,
            color,
            product_details: Some(product.clone()),
        }
    }

    /// The (product, size, color) tuple identifying this item.
    pub fn key(&self) -> LineItemKey<'_> {
        LineItemKey {
            product_id: self.product_id,
            size: self.size.as_deref(),
            color: self.color.as_deref(),
        }
    }

    /// Unit price from the product snapshot. Unresolved products price at zero.
    pub fn unit_price(&self) -> u64 {
        self.product_details
            .as_ref()
            .map_or(0, |product| product.price)
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> u64 {
        self.unit_price().saturating_mul(u64::from(self.quantity))
    }

    /// Drop the product snapshot, keeping only the persisted identity.
    #[must_use]
    pub fn without_details(mut self) -> Self {
        self.product_details = None;
        self
    }
}
