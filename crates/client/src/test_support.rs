//! Shared fixtures for client tests.

use std::sync::{Arc, Mutex};

use dazzle::{
    cart::{Cart, CartId},
    ids::UserId,
    items::LineItem,
    products::{CategoryId, Product, ProductId},
};
use jiff::Timestamp;

use crate::{
    api::MockStorefrontApi,
    notify::{MockNotifier, Notice},
};

pub(crate) type Saves = Arc<Mutex<Vec<(CartId, Vec<LineItem>)>>>;
pub(crate) type Notices = Arc<Mutex<Vec<Notice>>>;

pub(crate) fn product(id: i64, price: u64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Kurti {id}"),
        description: None,
        price,
        discounted_price: None,
        category_id: CategoryId::new(1),
        image_urls: vec![format!("https://images.example.com/{id}.jpg")],
        sizes: Some(vec!["S".to_string(), "M".to_string()]),
        colors: None,
        in_stock: true,
        is_featured: false,
        is_new_arrival: false,
        average_rating: 0,
        review_count: 0,
    }
}

/// Line item without a product snapshot.
pub(crate) fn item(product: i64, quantity: u32) -> LineItem {
    LineItem {
        product_id: ProductId::new(product),
        quantity,
        size: None,
        color: None,
        product_details: None,
    }
}

pub(crate) fn cart(id: CartId, items: Vec<LineItem>) -> Cart {
    Cart {
        id,
        user_id: Some(UserId::new(1)),
        items,
        version: 1,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Register a `save_cart` expectation that records each push.
pub(crate) fn record_saves(api: &mut MockStorefrontApi, saves: &Saves) {
    let saves = Arc::clone(saves);

    api.expect_save_cart().returning(move |id, items| {
        if let Ok(mut saves) = saves.lock() {
            saves.push((id, items.clone()));
        }

        Ok(cart(id, items))
    });
}

pub(crate) fn recording_notifier(notices: &Notices) -> MockNotifier {
    let notices = Arc::clone(notices);
    let mut notifier = MockNotifier::new();

    notifier.expect_notify().returning(move |notice| {
        if let Ok(mut notices) = notices.lock() {
            notices.push(notice);
        }
    });

    notifier
}

pub(crate) fn recorded<T: Clone>(values: &Arc<Mutex<Vec<T>>>) -> Vec<T> {
    values
        .lock()
        .map(|values| values.clone())
        .unwrap_or_default()
}
