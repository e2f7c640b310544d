//! Sample catalog used to populate an empty database.

use dazzle::{
    ids::UserId,
    products::{Category, CategoryId},
    reviews::NewReview,
};
use thiserror::Error;
use tracing::info;

use crate::{
    context::AppContext,
    domain::{
        categories::{CategoriesServiceError, models::NewCategory},
        products::{ProductsServiceError, models::NewProduct},
        reviews::ReviewsServiceError,
    },
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to seed categories")]
    Categories(#[from] CategoriesServiceError),

    #[error("failed to seed products")]
    Products(#[from] ProductsServiceError),

    #[error("failed to seed reviews")]
    Reviews(#[from] ReviewsServiceError),
}

/// Rows written by [`seed_catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub products: usize,
    pub reviews: usize,
}

struct SampleCategory {
    name: &'static str,
    description: &'static str,
    image_url: &'static str,
}

struct SampleProduct {
    name: &'static str,
    description: &'static str,
    price: u64,
    discounted_price: u64,
    category: usize,
    image_url: &'static str,
    sizes: &'static [&'static str],
    colors: &'static [&'static str],
    is_featured: bool,
    is_new_arrival: bool,
}

struct SampleReview {
    product: usize,
    user: i64,
    rating: u8,
    comment: &'static str,
    user_name: &'static str,
    user_location: &'static str,
}

const CATEGORIES: &[SampleCategory] = &[
    SampleCategory {
        name: "Casual Kurtis",
        description: "Perfect for everyday elegance",
        image_url: "https://images.unsplash.com/photo-1583391733981-8498287ebe32?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=800",
    },
    SampleCategory {
        name: "Festive Kurtis",
        description: "Celebrations call for something special",
        image_url: "https://images.unsplash.com/photo-1631233859219-52250f6c6b31?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=800",
    },
    SampleCategory {
        name: "Designer Fusion",
        description: "Where tradition meets modernity",
        image_url: "https://images.unsplash.com/photo-1617627143750-d86bc21e42bb?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=800",
    },
];

const PRODUCTS: &[SampleProduct] = &[
    SampleProduct {
        name: "Floral Chikankari Kurti",
        description: "Beautiful floral printed kurti in soft pastel colors with exquisite Chikankari work",
        price: 179_900,
        discounted_price: 249_900,
        category: 0,
        image_url: "https://images.unsplash.com/photo-1540246948439-35011a6ff5c6?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=800",
        sizes: &["S", "M", "L", "XL"],
        colors: &["Pastel Blue", "Pink", "White"],
        is_featured: true,
        is_new_arrival: true,
    },
    SampleProduct {
        name: "Zari Embroidered Kurti",
        description: "Elegant beige kurti with intricate golden Zari embroidery for a royal look",
        price: 229_900,
        discounted_price: 299_900,
        category: 1,
        image_url: "https://images.unsplash.com/photo-1602910344008-22f323cc1817?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=800",
        sizes: &["S", "M", "L", "XL"],
        colors: &["Beige", "Gold", "Maroon"],
        is_featured: true,
        is_new_arrival: false,
    },
    SampleProduct {
        name: "Mirror Work Cotton Kurti",
        description: "Vibrant blue kurti with geometric patterns and traditional mirror work",
        price: 159_900,
        discounted_price: 199_900,
        category: 0,
        image_url: "https://images.unsplash.com/photo-1595429035839-c99c298ffdde?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=800",
        sizes: &["S", "M", "L"],
        colors: &["Teal Blue", "Green", "Yellow"],
        is_featured: true,
        is_new_arrival: false,
    },
    SampleProduct {
        name: "Royal Silk Kurti",
        description: "Rich maroon silk kurti with gold embellishments and traditional design",
        price: 349_900,
        discounted_price: 499_900,
        category: 1,
        image_url: "https://images.unsplash.com/photo-1631233859219-52250f6c6b31?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=800",
        sizes: &["M", "L", "XL"],
        colors: &["Maroon", "Navy Blue", "Dark Green"],
        is_featured: true,
        is_new_arrival: false,
    },
    SampleProduct {
        name: "Casual Cotton Kurti",
        description: "Comfortable cotton kurti for everyday wear with simple yet elegant design",
        price: 129_900,
        discounted_price: 159_900,
        category: 0,
        image_url: "https://images.unsplash.com/photo-1583391733981-8498287ebe32?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=800",
        sizes: &["S", "M", "L", "XL", "XXL"],
        colors: &["Blue", "Green", "Yellow", "Pink"],
        is_featured: false,
        is_new_arrival: true,
    },
    SampleProduct {
        name: "Designer Party Wear Kurti",
        description: "Stylish designer kurti perfect for parties and special occasions",
        price: 279_900,
        discounted_price: 349_900,
        category: 2,
        image_url: "https://images.unsplash.com/photo-1617627143750-d86bc21e42bb?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=800",
        sizes: &["S", "M", "L"],
        colors: &["Black", "Red", "Gold"],
        is_featured: false,
        is_new_arrival: true,
    },
];

const REVIEWS: &[SampleReview] = &[
    SampleReview {
        product: 0,
        user: 1,
        rating: 5,
        comment: "The quality of the fabric and stitching is exceptional. I've received so many compliments on this kurti!",
        user_name: "Riya S.",
        user_location: "Jaipur, India",
    },
    SampleReview {
        product: 1,
        user: 2,
        rating: 5,
        comment: "Fast delivery and the kurti fits perfectly. The colors are vibrant and the zari embroidery detail is beautiful in person.",
        user_name: "Anjali M.",
        user_location: "Delhi, India",
    },
    SampleReview {
        product: 2,
        user: 3,
        rating: 4,
        comment: "I love how unique Dazzle Fashion's designs are. The Mirror Work Cotton Kurti I purchased is both comfortable and elegant.",
        user_name: "Kavita P.",
        user_location: "Mumbai, India",
    },
];

fn strings(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(ToString::to_string).collect())
}

/// Insert the sample catalog unless categories already exist.
///
/// # Errors
///
/// Returns an error when any insert fails. Rows written before the failure remain.
pub async fn seed_catalog(ctx: &AppContext) -> Result<SeedSummary, SeedError> {
    if !ctx.categories.list_categories().await?.is_empty() {
        info!("catalog already present, skipping seed");

        return Ok(SeedSummary::default());
    }

    let mut categories: Vec<Category> = Vec::with_capacity(CATEGORIES.len());

    for sample in CATEGORIES {
        let category = ctx
            .categories
            .create_category(NewCategory {
                name: sample.name.to_string(),
                description: Some(sample.description.to_string()),
                image_url: Some(sample.image_url.to_string()),
            })
            .await?;

        categories.push(category);
    }

    let mut products = Vec::with_capacity(PRODUCTS.len());

    for sample in PRODUCTS {
        let Some(category) = categories.get(sample.category) else {
            continue;
        };

        let product = ctx
            .products
            .create_product(NewProduct {
                name: sample.name.to_string(),
                description: Some(sample.description.to_string()),
                price: sample.price,
                discounted_price: Some(sample.discounted_price),
                category_id: category.id,
                image_urls: vec![sample.image_url.to_string()],
                sizes: strings(sample.sizes),
                colors: strings(sample.colors),
                in_stock: true,
                is_featured: sample.is_featured,
                is_new_arrival: sample.is_new_arrival,
            })
            .await?;

        products.push(product);
    }

    let mut reviews = 0;

    for sample in REVIEWS {
        let Some(product) = products.get(sample.product) else {
            continue;
        };

        ctx.reviews
            .create_review(NewReview {
                product_id: product.id,
                user_id: UserId::new(sample.user),
                rating: sample.rating,
                comment: Some(sample.comment.to_string()),
                user_name: Some(sample.user_name.to_string()),
                user_location: Some(sample.user_location.to_string()),
                user_image: None,
            })
            .await?;

        reviews += 1;
    }

    let summary = SeedSummary {
        categories: categories.len(),
        products: products.len(),
        reviews,
    };

    info!(?summary, "seeded catalog");

    Ok(summary)
}
