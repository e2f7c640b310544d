//! Category Models

use dazzle::products::Category;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Category Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryResponse {
    /// Category id
    pub id: i64,

    /// Display name
    pub name: String,

    pub description: Option<String>,

    /// Banner image URL
    pub image_url: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into_inner(),
            name: category.name,
            description: category.description,
            image_url: category.image_url,
        }
    }
}
