//! Product Models

use dazzle::products::CategoryId;

/// Product listing filter. Every present constraint must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Only products in this category
    pub category: Option<CategoryId>,

    /// Only featured products
    pub featured: bool,

    /// Only new arrivals
    pub new_arrivals: bool,

    /// Case-insensitive substring of the name or description
    pub search: Option<String>,
}

impl ProductFilter {
    /// `ILIKE` pattern for the search term, with wildcards in the term escaped.
    pub(crate) fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref().map(str::trim)?;

        if term.is_empty() {
            return None;
        }

        let mut pattern = String::with_capacity(term.len() + 2);

        pattern.push('%');

        for ch in term.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }

            pattern.push(ch);
        }

        pattern.push('%');

        Some(pattern)
    }
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub discounted_price: Option<u64>,
    pub category_id: CategoryId,
    pub image_urls: Vec<String>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub in_stock: bool,
    pub is_featured: bool,
    pub is_new_arrival: bool,
}
