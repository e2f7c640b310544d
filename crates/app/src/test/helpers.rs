//! Test Helpers

use dazzle::{
    checkout::ShippingAddress,
    ids::UserId,
    items::LineItem,
    orders::{OrderRequest, PENDING},
    products::{Category, CategoryId, Product, ProductId},
    reviews::NewReview,
};

use crate::{
    domain::{
        categories::{CategoriesService, CategoriesServiceError, models::NewCategory},
        products::{ProductsService, ProductsServiceError, models::NewProduct},
    },
    test::TestContext,
};

pub(crate) fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: Some(format!("{name} collection")),
        image_url: None,
    }
}

pub(crate) async fn create_category(
    ctx: &TestContext,
    name: &str,
) -> Result<Category, CategoriesServiceError> {
    ctx.categories.create_category(new_category(name)).await
}

pub(crate) fn new_product(category: CategoryId, name: &str, price: u64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: Some(format!("{name} in soft cotton")),
        price,
        discounted_price: None,
        category_id: category,
        image_urls: vec![format!("https://images.example.com/{}.jpg", name.len())],
        sizes: Some(vec!["S".to_string(), "M".to_string(), "L".to_string()]),
        colors: None,
        in_stock: true,
        is_featured: false,
        is_new_arrival: false,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    category: CategoryId,
    name: &str,
    price: u64,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .create_product(new_product(category, name, price))
        .await
}

pub(crate) fn line_item(product: ProductId, quantity: u32, size: Option<&str>) -> LineItem {
    LineItem {
        product_id: product,
        quantity,
        size: size.map(ToString::to_string),
        color: None,
        product_details: None,
    }
}

pub(crate) fn order_request(user: Option<UserId>, items: Vec<LineItem>) -> OrderRequest {
    OrderRequest {
        user_id: user,
        items,
        status: PENDING.to_string(),
        total_amount: 0,
        shipping_address: ShippingAddress {
            full_name: "Riya Sharma".to_string(),
            email: "riya@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MI Road".to_string(),
            city: "Jaipur".to_string(),
            state: "Rajasthan".to_string(),
            postal_code: "302001".to_string(),
            additional_notes: None,
        },
        payment_method: "cod".to_string(),
        idempotency_key: None,
    }
}

pub(crate) fn new_review(product: ProductId, user: UserId, rating: u8) -> NewReview {
    NewReview {
        product_id: product,
        user_id: user,
        rating,
        comment: Some("Lovely fabric".to_string()),
        user_name: Some("Riya S.".to_string()),
        user_location: Some("Jaipur, India".to_string()),
        user_image: None,
    }
}
