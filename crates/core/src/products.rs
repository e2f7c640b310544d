//! Products

use serde::{Deserialize, Serialize};

use crate::{ids::TypedId, pricing::discount_percentage};

/// Product Id
pub type ProductId = TypedId<Product>;

/// Category Id
pub type CategoryId = TypedId<Category>;

/// Product
///
/// `price` is the current selling price. `discounted_price` is the higher
/// reference price shown struck through next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Long description
    #[serde(default)]
    pub description: Option<String>,

    /// Selling price in paise
    pub price: u64,

    /// Reference (pre-discount) price in paise
    #[serde(default)]
    pub discounted_price: Option<u64>,

    /// Owning category
    pub category_id: CategoryId,

    /// Image URLs, first one is the primary image
    pub image_urls: Vec<String>,

    /// Selectable sizes
    #[serde(default)]
    pub sizes: Option<Vec<String>>,

    /// Selectable colors
    #[serde(default)]
    pub colors: Option<Vec<String>>,

    /// Whether the product can be ordered
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,

    /// Shown in the featured section
    #[serde(default)]
    pub is_featured: bool,

    /// Shown in the new arrivals section
    #[serde(default)]
    pub is_new_arrival: bool,

    /// Rounded mean of all review ratings
    #[serde(default)]
    pub average_rating: u32,

    /// Number of reviews
    #[serde(default)]
    pub review_count: u32,
}

fn in_stock_default() -> bool {
    true
}

impl Product {
    /// Percentage saved against the reference price, rounded to a whole number.
    pub fn discount_percentage(&self) -> u64 {
        discount_percentage(self.price, self.discounted_price)
    }

    /// Primary image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

/// Category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category id
    pub id: CategoryId,

    /// Unique display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Banner image
    #[serde(default)]
    pub image_url: Option<String>,
}
