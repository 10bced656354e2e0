//! The catalog subscription manager.
//!
//! [`CatalogApi`] is the one place a consumer deals with subscription lifecycle. `subscribe` opens a feed against
//! the backend and drives the caller's async callbacks from a background task; the returned [`SubscriptionHandle`]
//! is the only way to stop it. Writes are deliberately thin pass-throughs: the updated snapshot arrives through the
//! already-active subscription, never as a return value, so there is a single source of truth for catalog state.
use std::{future::Future, pin::Pin, sync::Arc};

use log::*;
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    catalog_types::{Product, ProductDocument, ProductId},
    events::FeedEvent,
    traits::{ProductCollection, ProductCollectionError},
};

/// Called with the complete product list on every delivery.
pub type SnapshotHandler = Arc<dyn Fn(Vec<Product>) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;
/// Called at most once, when the feed dies.
pub type ErrorHandler =
    Arc<dyn Fn(ProductCollectionError) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Active,
    /// The feed reported a terminal error. The error handler has run (or is about to); no snapshot follows.
    Errored,
    Cancelled,
}

/// Owner's handle to a live subscription.
///
/// Dropping the handle does NOT cancel the subscription; call [`cancel`](SubscriptionHandle::cancel). Once `cancel`
/// returns, neither callback will run again: every delivery holds the state lock for its whole invocation, and
/// `cancel` flips the state to `Cancelled` under that same lock.
pub struct SubscriptionHandle {
    state: Arc<Mutex<SubscriptionState>>,
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    pub async fn state(&self) -> SubscriptionState {
        *self.state.lock().await
    }

    /// Stop the subscription. Idempotent, and a no-op on an already errored feed.
    pub async fn cancel(&self) {
        let mut state = self.state.lock().await;
        if *state == SubscriptionState::Active {
            *state = SubscriptionState::Cancelled;
            debug!("🛎️ Catalog subscription cancelled.");
        }
        drop(state);
        self.task.abort();
    }
}

/// The live-catalog API over a [`ProductCollection`] backend.
#[derive(Clone)]
pub struct CatalogApi<B> {
    backend: B,
}

impl<B> CatalogApi<B>
where B: ProductCollection + Send + Sync + 'static
{
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Open a live subscription against the collection.
    ///
    /// `on_snapshot` runs for every delivery, in delivery order, each call seeing state at least as fresh as the
    /// last. `on_error` runs at most once, after which the subscription is dead. Deliveries are serialized; a slow
    /// handler delays later snapshots rather than overlapping with them.
    pub async fn subscribe(
        &self,
        on_snapshot: SnapshotHandler,
        on_error: ErrorHandler,
    ) -> Result<SubscriptionHandle, ProductCollectionError> {
        let mut feed = self.backend.watch().await?;
        debug!("🛎️ Catalog subscription opened on {}.", self.backend.path());
        let state = Arc::new(Mutex::new(SubscriptionState::Active));
        let task_state = Arc::clone(&state);
        let task = tokio::spawn(async move {
            while let Some(event) = feed.next_event().await {
                let mut state = task_state.lock().await;
                if *state != SubscriptionState::Active {
                    break;
                }
                match event {
                    FeedEvent::Snapshot(products) => {
                        trace!("🛎️ Delivering a catalog snapshot of {} product(s).", products.len());
                        on_snapshot(products).await;
                    },
                    FeedEvent::Error(err) => {
                        warn!("🛎️ Catalog feed died: {err}");
                        *state = SubscriptionState::Errored;
                        on_error(err).await;
                        break;
                    },
                }
            }
        });
        Ok(SubscriptionHandle { state, task })
    }

    /// One-shot read of the complete collection, outside any subscription.
    pub async fn fetch_all(&self) -> Result<Vec<Product>, ProductCollectionError> {
        self.backend.fetch_all().await
    }

    /// Write a new product document. The result surfaces on active subscriptions, not here.
    pub async fn create_product(&self, document: ProductDocument) -> Result<ProductId, ProductCollectionError> {
        self.backend.add_product(document).await
    }

    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ProductCollectionError> {
        self.backend.delete_product(id).await
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        catalog_types::NewProduct,
        test_utils::{sample_product, setup_logging, MemoryCollection},
    };

    fn collector() -> (SnapshotHandler, mpsc::UnboundedReceiver<Vec<Product>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handler: SnapshotHandler = Arc::new(move |products| {
            let tx = tx.clone();
            Box::pin(async move {
                let _ = tx.send(products);
            })
        });
        (handler, rx)
    }

    fn error_collector() -> (ErrorHandler, mpsc::UnboundedReceiver<ProductCollectionError>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handler: ErrorHandler = Arc::new(move |err| {
            let tx = tx.clone();
            Box::pin(async move {
                let _ = tx.send(err);
            })
        });
        (handler, rx)
    }

    fn document(name: &str) -> ProductDocument {
        let form = NewProduct {
            name: name.to_string(),
            team: "RedFC".to_string(),
            alt_text: format!("{name} jersey"),
            ..Default::default()
        };
        ProductDocument::new(form, "https://img.test/v1/jerseys/kit.png".to_string(), chrono::Utc::now())
    }

    #[tokio::test]
    async fn snapshots_arrive_in_order_and_reflect_writes() {
        setup_logging();
        let api = CatalogApi::new(MemoryCollection::new());
        let (on_snapshot, mut snapshots) = collector();
        let (on_error, _errors) = error_collector();
        let handle = api.subscribe(on_snapshot, on_error).await.unwrap();
        // The initial snapshot is empty.
        assert!(snapshots.recv().await.unwrap().is_empty());
        let id = api.create_product(document("Home Kit")).await.unwrap();
        let after_add = snapshots.recv().await.unwrap();
        assert_eq!(after_add.len(), 1);
        assert_eq!(after_add[0].id, id);
        api.delete_product(&id).await.unwrap();
        assert!(snapshots.recv().await.unwrap().is_empty());
        assert_eq!(handle.state().await, SubscriptionState::Active);
        handle.cancel().await;
    }

    #[tokio::test]
    async fn nothing_is_delivered_after_cancel_returns() {
        let collection = MemoryCollection::new();
        let api = CatalogApi::new(collection.clone());
        let (on_snapshot, mut snapshots) = collector();
        let (on_error, _errors) = error_collector();
        let handle = api.subscribe(on_snapshot, on_error).await.unwrap();
        assert!(snapshots.recv().await.unwrap().is_empty());
        handle.cancel().await;
        assert_eq!(handle.state().await, SubscriptionState::Cancelled);
        // A write arriving after cancellation must not reach the handler.
        collection.add_product(document("Home Kit")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(snapshots.try_recv().is_err());
        // Cancelling again is a no-op.
        handle.cancel().await;
        assert_eq!(handle.state().await, SubscriptionState::Cancelled);
    }

    #[tokio::test]
    async fn a_feed_error_runs_the_error_handler_exactly_once() {
        let collection = MemoryCollection::with_products(vec![sample_product("p1", "Home Kit", "RedFC")]).await;
        let api = CatalogApi::new(collection.clone());
        let (on_snapshot, mut snapshots) = collector();
        let (on_error, mut errors) = error_collector();
        let handle = api.subscribe(on_snapshot, on_error).await.unwrap();
        assert_eq!(snapshots.recv().await.unwrap().len(), 1);
        collection.inject_error(ProductCollectionError::PermissionDenied("revoked".to_string())).await;
        let err = errors.recv().await.unwrap();
        assert!(matches!(err, ProductCollectionError::PermissionDenied(_)));
        assert_eq!(handle.state().await, SubscriptionState::Errored);
        // The sender was consumed by the error, so nothing else can arrive.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(snapshots.try_recv().is_err());
        assert!(errors.try_recv().is_err());
        // Cancel after an error leaves the state as Errored.
        handle.cancel().await;
        assert_eq!(handle.state().await, SubscriptionState::Errored);
    }

    #[tokio::test]
    async fn two_subscriptions_are_independent() {
        let collection = MemoryCollection::new();
        let api = CatalogApi::new(collection.clone());
        let (first_handler, mut first) = collector();
        let (second_handler, mut second) = collector();
        let (on_error, _e1) = error_collector();
        let (on_error2, _e2) = error_collector();
        let h1 = api.subscribe(first_handler, on_error).await.unwrap();
        let h2 = api.subscribe(second_handler, on_error2).await.unwrap();
        assert!(first.recv().await.unwrap().is_empty());
        assert!(second.recv().await.unwrap().is_empty());
        h1.cancel().await;
        api.create_product(document("Home Kit")).await.unwrap();
        assert_eq!(second.recv().await.unwrap().len(), 1);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(first.try_recv().is_err());
        h2.cancel().await;
    }
}
