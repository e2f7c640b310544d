//! Cart Sync
//!
//! Cart changes are published to a background worker over a `watch` channel.
//! The worker waits for a quiet period, then pushes the latest item list to
//! the server. Intermediate lists are never sent, and the last push to land
//! wins. Failures are reported through the [`Notifier`]; there is no retry.

use std::{sync::Arc, time::Duration};

use dazzle::{cart::CartId, items::LineItem};
use tokio::{sync::watch, task::JoinHandle, time::timeout};
use tracing::{debug, warn};

use crate::{
    api::StorefrontApi,
    notify::{Notice, Notifier},
};

/// Handle to a running sync worker for one cart.
#[derive(Debug)]
pub struct CartSync {
    cart: CartId,
    sender: watch::Sender<Vec<LineItem>>,
    worker: JoinHandle<()>,
}

impl CartSync {
    /// Spawn a worker pushing changes for `cart` after `debounce` of quiet.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(
        api: Arc<dyn StorefrontApi>,
        notifier: Arc<dyn Notifier>,
        cart: CartId,
        debounce: Duration,
    ) -> Self {
        let (sender, receiver) = watch::channel(Vec::new());

        let worker = tokio::spawn(run(api, notifier, cart, debounce, receiver));

        Self {
            cart,
            sender,
            worker,
        }
    }

    /// The cart this worker pushes to.
    pub fn cart(&self) -> CartId {
        self.cart
    }

    /// Queue `items` as the cart's latest contents.
    pub fn publish(&self, items: Vec<LineItem>) {
        self.sender.send_replace(items);
    }

    /// Flush any pending change and wait for the worker to exit.
    pub async fn shutdown(self) {
        let Self { sender, worker, .. } = self;

        drop(sender);

        if let Err(error) = worker.await {
            warn!(%error, "cart sync worker failed");
        }
    }
}

async fn run(
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn Notifier>,
    cart: CartId,
    debounce: Duration,
    mut receiver: watch::Receiver<Vec<LineItem>>,
) {
    while receiver.changed().await.is_ok() {
        // Restart the quiet period on every change; a closed channel flushes.
        while let Ok(Ok(())) = timeout(debounce, receiver.changed()).await {}

        let items = receiver.borrow_and_update().clone();

        push(api.as_ref(), notifier.as_ref(), cart, items).await;
    }

    debug!(%cart, "cart sync worker stopped");
}

async fn push(
    api: &dyn StorefrontApi,
    notifier: &dyn Notifier,
    cart: CartId,
    items: Vec<LineItem>,
) {
    let count = items.len();

    match api.save_cart(cart, items).await {
        Ok(saved) => debug!(%cart, items = count, version = saved.version, "cart synced"),
        Err(error) => {
            warn!(%cart, %error, "cart sync failed");

            notifier.notify(Notice::error(
                "Error",
                "Failed to update your cart. Please try again.",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{ApiError, MockStorefrontApi},
        notify::NoticeKind,
        test_support::{Notices, Saves, item, record_saves, recorded, recording_notifier},
    };

    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn spawn(saves: &Saves, notices: &Notices) -> CartSync {
        let mut api = MockStorefrontApi::new();

        record_saves(&mut api, saves);

        CartSync::spawn(
            Arc::new(api),
            Arc::new(recording_notifier(notices)),
            CartId::new(7),
            DEBOUNCE,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_changes_pushes_latest_list_once() {
        let saves = Saves::default();
        let sync = spawn(&saves, &Notices::default());

        sync.publish(vec![item(1, 1)]);
        sync.publish(vec![item(1, 2)]);
        sync.publish(vec![item(1, 2), item(2, 1)]);

        tokio::time::sleep(Duration::from_secs(1)).await;

        sync.shutdown().await;

        let saves = recorded(&saves);

        assert_eq!(saves.len(), 1, "expected a single push, got {saves:?}");
        assert_eq!(
            saves.first(),
            Some(&(CartId::new(7), vec![item(1, 2), item(2, 1)]))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn change_during_quiet_period_delays_push() {
        let saves = Saves::default();
        let sync = spawn(&saves, &Notices::default());

        sync.publish(vec![item(1, 1)]);

        tokio::time::sleep(Duration::from_millis(200)).await;

        sync.publish(vec![item(1, 1), item(3, 1)]);

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(recorded(&saves).is_empty(), "push happened before the quiet period");

        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(recorded(&saves).len(), 1, "expected one push after the quiet period");

        sync.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn separated_changes_each_push() {
        let saves = Saves::default();
        let sync = spawn(&saves, &Notices::default());

        sync.publish(vec![item(1, 1)]);

        tokio::time::sleep(Duration::from_secs(1)).await;

        sync.publish(Vec::new());

        tokio::time::sleep(Duration::from_secs(1)).await;

        sync.shutdown().await;

        let lists: Vec<Vec<LineItem>> = recorded(&saves)
            .into_iter()
            .map(|(_, items)| items)
            .collect();

        assert_eq!(lists, [vec![item(1, 1)], Vec::new()]);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_flushes_pending_change() {
        let saves = Saves::default();
        let sync = spawn(&saves, &Notices::default());

        sync.publish(vec![item(4, 2)]);
        sync.shutdown().await;

        assert_eq!(recorded(&saves).len(), 1, "pending change was not flushed");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_push_notifies() {
        let mut api = MockStorefrontApi::new();

        api.expect_save_cart().returning(|_, _| {
            Err(ApiError::UnexpectedStatus {
                status: 500,
                body: "Failed to update cart".to_string(),
            })
        });

        let notices = Notices::default();

        let sync = CartSync::spawn(
            Arc::new(api),
            Arc::new(recording_notifier(&notices)),
            CartId::new(7),
            DEBOUNCE,
        );

        sync.publish(vec![item(1, 1)]);

        tokio::time::sleep(Duration::from_secs(1)).await;

        sync.shutdown().await;

        let notices = recorded(&notices);

        assert_eq!(notices.len(), 1, "expected one notice, got {notices:?}");
        assert!(
            notices.iter().all(|notice| notice.kind == NoticeKind::Error),
            "expected an error notice"
        );
    }
}
