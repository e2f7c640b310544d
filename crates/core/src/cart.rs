//! Cart

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    ids::{TypedId, UserId},
    items::LineItem,
    pricing::{ShippingPolicy, Totals, calculate_totals, subtotal},
    products::{Product, ProductId},
};

/// Cart Id
pub type CartId = TypedId<Cart>;

/// Server-persisted cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart id
    pub id: CartId,

    /// Owning user, `None` for anonymous carts
    pub user_id: Option<UserId>,

    /// Line items in insertion order
    pub items: Vec<LineItem>,

    /// Incremented on every write
    #[serde(default)]
    pub version: i64,

    /// Creation time
    pub created_at: Timestamp,

    /// Last write time
    pub updated_at: Timestamp,
}

/// What a cart mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line item was appended.
    Added,

    /// An existing line item's quantity was increased to the given value.
    Merged(u32),

    /// The given number of line items were updated.
    Updated(usize),

    /// The given number of line items were removed.
    Removed(usize),

    /// All line items were removed.
    Cleared,

    /// Nothing changed.
    Unchanged,
}

impl CartChange {
    /// Whether the item list was modified.
    pub fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged | Self::Removed(0) | Self::Updated(0))
    }
}

/// Client-held cart contents.
///
/// Items are unique by (product, size, color) and always have a quantity of
/// at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartStore {
    items: Vec<LineItem>,
}

impl CartStore {
    /// Create an empty cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart store from existing items.
    ///
    /// Zero-quantity items are dropped and duplicate keys are merged.
    pub fn with_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut store = Self::new();

        store.replace_items(items);

        store
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` units of `product`, merging into an existing item with
    /// the same size and color.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> CartChange {
        if quantity == 0 {
            return CartChange::Unchanged;
        }

        let existing = self.items.iter_mut().find(|item| {
            item.product_id == product.id
                && item.size.as_deref() == size.as_deref()
                && item.color.as_deref() == color.as_deref()
        });

        if let Some(item) = existing {
            item.quantity = item.quantity.saturating_add(quantity);

            return CartChange::Merged(item.quantity);
        }

        self.items.push(LineItem::new(product, quantity, size, color));

        CartChange::Added
    }

    /// Remove every item for `product_id`, whatever its size or color.
    pub fn remove_item(&mut self, product_id: ProductId) -> CartChange {
        let before = self.items.len();

        self.items.retain(|item| item.product_id != product_id);

        CartChange::Removed(before - self.items.len())
    }

    /// Set the quantity of every item for `product_id`.
    ///
    /// A quantity of zero or less removes the product.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> CartChange {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let mut updated = 0;

        for item in self
            .items
            .iter_mut()
            .filter(|item| item.product_id == product_id)
        {
            item.quantity = quantity;
            updated += 1;
        }

        CartChange::Updated(updated)
    }

    /// Remove all items.
    pub fn clear(&mut self) -> CartChange {
        if self.items.is_empty() {
            return CartChange::Unchanged;
        }

        self.items.clear();

        CartChange::Cleared
    }

    /// Replace the contents with `items`, e.g. when adopting the server's copy.
    pub fn replace_items(&mut self, items: impl IntoIterator<Item = LineItem>) {
        self.items.clear();

        for item in items {
            if item.quantity == 0 {
                continue;
            }

            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|existing| existing.key() == item.key())
            {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else {
                self.items.push(item);
            }
        }
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Sum of snapshot price × quantity. Unresolved products count as zero.
    pub fn subtotal(&self) -> u64 {
        subtotal(&self.items)
    }

    /// Subtotal, shipping fee and total under `policy`.
    pub fn totals(&self, policy: &ShippingPolicy) -> Totals {
        calculate_totals(&self.items, policy)
    }
}
