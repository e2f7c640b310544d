//! Test helpers.

use std::sync::Arc;

use dazzle::{
    cart::{Cart, CartId},
    checkout::ShippingAddress,
    ids::UserId,
    items::LineItem,
    orders::{Order, OrderId, PENDING},
    products::{Category, CategoryId, Product, ProductId},
    reviews::{Review, ReviewId},
};
use dazzle_app::{
    context::AppContext,
    domain::{
        carts::MockCartsService, categories::MockCategoriesService, orders::MockOrdersService,
        products::MockProductsService, reviews::MockReviewsService,
    },
};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use crate::state::State;

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();

    products
}

fn strict_categories_mock() -> MockCategoriesService {
    let mut categories = MockCategoriesService::new();

    categories.expect_list_categories().never();
    categories.expect_get_category().never();
    categories.expect_create_category().never();

    categories
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_user_cart().never();
    carts.expect_replace_items().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_list_orders().never();
    orders.expect_update_status().never();

    orders
}

fn strict_reviews_mock() -> MockReviewsService {
    let mut reviews = MockReviewsService::new();

    reviews.expect_list_reviews().never();
    reviews.expect_create_review().never();

    reviews
}

fn strict_context() -> AppContext {
    AppContext {
        products: Arc::new(strict_products_mock()),
        categories: Arc::new(strict_categories_mock()),
        carts: Arc::new(strict_carts_mock()),
        orders: Arc::new(strict_orders_mock()),
        reviews: Arc::new(strict_reviews_mock()),
    }
}

fn service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(
        AppContext {
            products: Arc::new(products),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    service(
        AppContext {
            categories: Arc::new(categories),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service(
        AppContext {
            carts: Arc::new(carts),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service(
        AppContext {
            orders: Arc::new(orders),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn reviews_service(reviews: MockReviewsService, route: Router) -> Service {
    service(
        AppContext {
            reviews: Arc::new(reviews),
            ..strict_context()
        },
        route,
    )
}

/// Kurti priced at 1,799 rupees, down from 2,499.
pub(crate) fn make_product(id: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Chikankari Kurti {id}"),
        description: Some("Hand-embroidered cotton kurti".to_string()),
        price: 179_900,
        discounted_price: Some(249_900),
        category_id: CategoryId::new(1),
        image_urls: vec![format!("https://images.example.com/kurti-{id}.jpg")],
        sizes: Some(vec!["S".to_string(), "M".to_string(), "L".to_string()]),
        colors: Some(vec!["White".to_string()]),
        in_stock: true,
        is_featured: true,
        is_new_arrival: false,
        average_rating: 4,
        review_count: 12,
    }
}

pub(crate) fn make_category(id: i64, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        description: None,
        image_url: None,
    }
}

/// Line item carrying a snapshot of [`make_product`].
pub(crate) fn make_item(product: i64, quantity: u32) -> LineItem {
    LineItem {
        product_id: ProductId::new(product),
        quantity,
        size: Some("M".to_string()),
        color: None,
        product_details: Some(make_product(product)),
    }
}

pub(crate) fn make_cart(id: i64, items: Vec<LineItem>) -> Cart {
    Cart {
        id: CartId::new(id),
        user_id: Some(UserId::new(1)),
        items,
        version: 1,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(id: i64, user: i64) -> Order {
    Order {
        id: OrderId::new(id),
        user_id: Some(UserId::new(user)),
        items: vec![make_item(7, 2)],
        status: PENDING.to_string(),
        total_amount: 359_800,
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
        payment_method: "upi".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        idempotency_key: None,
    }
}

pub(crate) fn make_review(id: i64, product: i64, rating: u8) -> Review {
    Review {
        id: ReviewId::new(id),
        product_id: ProductId::new(product),
        user_id: UserId::new(1),
        rating,
        comment: Some("Beautiful work".to_string()),
        user_name: Some("Priya".to_string()),
        user_location: Some("Jaipur".to_string()),
        user_image: None,
    }
}
