//! Product Models

use dazzle::products::Product;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Product Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// Product id
    pub id: i64,

    /// Display name
    pub name: String,

    /// Long description
    pub description: Option<String>,

    /// Selling price in paise
    pub price: u64,

    /// Struck-through reference price in paise
    pub discounted_price: Option<u64>,

    /// Whole percentage saved against the reference price
    pub discount_percentage: u64,

    /// Owning category id
    pub category_id: i64,

    /// Image URLs, primary image first
    pub image_urls: Vec<String>,

    /// Selectable sizes
    pub sizes: Option<Vec<String>>,

    /// Selectable colors
    pub colors: Option<Vec<String>>,

    /// Whether the product can be ordered
    pub in_stock: bool,

    /// Shown in the featured section
    pub is_featured: bool,

    /// Shown in the new arrivals section
    pub is_new_arrival: bool,

    /// Rounded mean review rating
    pub average_rating: u32,

    /// Number of reviews
    pub review_count: u32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            discount_percentage: product.discount_percentage(),
            id: product.id.into_inner(),
            name: product.name,
            description: product.description,
            price: product.price,
            discounted_price: product.discounted_price,
            category_id: product.category_id.into_inner(),
            image_urls: product.image_urls,
            sizes: product.sizes,
            colors: product.colors,
            in_stock: product.in_stock,
            is_featured: product.is_featured,
            is_new_arrival: product.is_new_arrival,
            average_rating: product.average_rating,
            review_count: product.review_count,
        }
    }
}
