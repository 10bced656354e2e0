//! In-memory implementations of the backend traits.
//!
//! These keep the full feed contract: every successful write broadcasts the complete product list to every open
//! feed, and an injected error is terminal for the feeds that receive it.
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use rand::{distributions::Alphanumeric, Rng};
use tokio::sync::{watch, Mutex};

use crate::{
    catalog_types::{Product, ProductDocument, ProductId, UserId},
    events::{snapshot_channel, SnapshotFeed, SnapshotSender},
    traits::{
        AuthFeed, AuthProvider, AuthProviderError, MediaStore, MediaStoreError, ProductCollection,
        ProductCollectionError, StoredImage,
    },
};

//--------------------------------------     MemoryCollection       --------------------------------------------------
#[derive(Default)]
struct CollectionInner {
    products: Vec<Product>,
    feeds: Vec<SnapshotSender>,
}

/// An in-memory [`ProductCollection`].
#[derive(Clone, Default)]
pub struct MemoryCollection {
    inner: Arc<Mutex<CollectionInner>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_products(products: Vec<Product>) -> Self {
        let result = Self::new();
        result.inner.lock().await.products = products;
        result
    }

    /// Push a terminal error onto every open feed, consuming the senders.
    pub async fn inject_error(&self, error: ProductCollectionError) {
        let mut inner = self.inner.lock().await;
        for feed in inner.feeds.drain(..) {
            feed.publish_error(error.clone()).await;
        }
    }

    pub async fn product_count(&self) -> usize {
        self.inner.lock().await.products.len()
    }

    async fn broadcast(inner: &mut CollectionInner) {
        let snapshot = inner.products.clone();
        let mut live = Vec::with_capacity(inner.feeds.len());
        for feed in inner.feeds.drain(..) {
            if feed.publish_snapshot(snapshot.clone()).await {
                live.push(feed);
            }
        }
        inner.feeds = live;
    }
}

impl ProductCollection for MemoryCollection {
    fn path(&self) -> &str {
        "memory/products"
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, ProductCollectionError> {
        Ok(self.inner.lock().await.products.clone())
    }

    async fn add_product(&self, document: ProductDocument) -> Result<ProductId, ProductCollectionError> {
        let id: String = rand::thread_rng().sample_iter(&Alphanumeric).take(20).map(char::from).collect();
        let id = ProductId(id);
        let mut inner = self.inner.lock().await;
        inner.products.push(Product::from_document(id.clone(), document));
        Self::broadcast(&mut inner).await;
        Ok(id)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductCollectionError> {
        let mut inner = self.inner.lock().await;
        let before = inner.products.len();
        inner.products.retain(|p| &p.id != id);
        if inner.products.len() == before {
            return Err(ProductCollectionError::NotFound(id.clone()));
        }
        Self::broadcast(&mut inner).await;
        Ok(())
    }

    async fn watch(&self) -> Result<SnapshotFeed, ProductCollectionError> {
        let (sender, feed) = snapshot_channel(16);
        let mut inner = self.inner.lock().await;
        // New feeds see the current state immediately.
        sender.publish_snapshot(inner.products.clone()).await;
        inner.feeds.push(sender);
        Ok(feed)
    }
}

//--------------------------------------     MemoryMedia       -------------------------------------------------------
#[derive(Default)]
struct MediaInner {
    uploads: Vec<String>,
    deletions: Vec<String>,
    fail_uploads: bool,
    fail_deletions: bool,
}

/// An in-memory [`MediaStore`] that records every upload and deletion and can be told to fail on demand.
///
/// Delivery URLs take the shape `https://img.test/v1/{public_id}.png`, so public-id extraction is the same
/// "everything after the version marker, minus the extension" rule real hosts use.
#[derive(Clone, Default)]
pub struct MemoryMedia {
    inner: Arc<Mutex<MediaInner>>,
    serial: Arc<AtomicU64>,
}

impl MemoryMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_uploads(&self, fail: bool) {
        self.inner.lock().await.fail_uploads = fail;
    }

    pub async fn set_fail_deletions(&self, fail: bool) {
        self.inner.lock().await.fail_deletions = fail;
    }

    pub async fn uploads(&self) -> Vec<String> {
        self.inner.lock().await.uploads.clone()
    }

    pub async fn deletions(&self) -> Vec<String> {
        self.inner.lock().await.deletions.clone()
    }
}

impl MediaStore for MemoryMedia {
    async fn upload_image(&self, _bytes: Vec<u8>, filename: &str) -> Result<StoredImage, MediaStoreError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_uploads {
            return Err(MediaStoreError::UploadFailed("upload disabled for this test".to_string()));
        }
        let n = self.serial.fetch_add(1, Ordering::SeqCst);
        let stem = filename.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(filename);
        let public_id = format!("jerseys/{stem}-{n}");
        inner.uploads.push(public_id.clone());
        Ok(StoredImage { url: format!("https://img.test/v1/{public_id}.png"), public_id })
    }

    async fn delete_image(&self, public_id: &str) -> Result<(), MediaStoreError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_deletions {
            return Err(MediaStoreError::DeleteFailed("deletion disabled for this test".to_string()));
        }
        inner.deletions.push(public_id.to_string());
        Ok(())
    }

    fn extract_public_id(&self, image_url: &str) -> Result<String, MediaStoreError> {
        let (_, rest) = image_url
            .split_once("/v1/")
            .ok_or_else(|| MediaStoreError::InvalidImageUrl(image_url.to_string()))?;
        let public_id = rest.rsplit_once('.').map(|(id, _)| id).unwrap_or(rest);
        if public_id.is_empty() {
            return Err(MediaStoreError::InvalidImageUrl(image_url.to_string()));
        }
        Ok(public_id.to_string())
    }
}

//--------------------------------------     MemoryAuth       --------------------------------------------------------
struct AuthInner {
    users: HashMap<String, (String, UserId)>,
    sender: watch::Sender<Option<UserId>>,
}

/// An in-memory [`AuthProvider`] seeded with email/password credentials.
#[derive(Clone)]
pub struct MemoryAuth {
    inner: Arc<Mutex<AuthInner>>,
    receiver: watch::Receiver<Option<UserId>>,
}

impl MemoryAuth {
    pub fn new(users: &[(&str, &str, &str)]) -> Self {
        let users = users
            .iter()
            .map(|(email, password, uid)| (email.to_string(), (password.to_string(), UserId::from(*uid))))
            .collect();
        let (sender, receiver) = watch::channel(None);
        Self { inner: Arc::new(Mutex::new(AuthInner { users, sender })), receiver }
    }
}

impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, AuthProviderError> {
        let inner = self.inner.lock().await;
        match inner.users.get(email) {
            Some((expected, uid)) if expected == password => {
                let _ = inner.sender.send(Some(uid.clone()));
                Ok(uid.clone())
            },
            _ => Err(AuthProviderError::InvalidCredentials),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthProviderError> {
        let inner = self.inner.lock().await;
        let _ = inner.sender.send(None);
        Ok(())
    }

    fn watch_auth(&self) -> AuthFeed {
        AuthFeed::new(self.receiver.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        catalog_types::NewProduct,
        events::FeedEvent,
        test_utils::{sample_product, setup_logging},
    };

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
    async fn writes_broadcast_full_snapshots() {
        setup_logging();
        let collection = MemoryCollection::new();
        let mut feed = collection.watch().await.unwrap();
        // Initial snapshot is empty.
        let Some(FeedEvent::Snapshot(initial)) = feed.next_event().await else {
            panic!("expected the initial snapshot");
        };
        assert!(initial.is_empty());
        let id = collection.add_product(document("Home Kit")).await.unwrap();
        let Some(FeedEvent::Snapshot(after_add)) = feed.next_event().await else {
            panic!("expected a snapshot after the add");
        };
        assert_eq!(after_add.len(), 1);
        assert_eq!(after_add[0].id, id);
        collection.delete_product(&id).await.unwrap();
        let Some(FeedEvent::Snapshot(after_delete)) = feed.next_event().await else {
            panic!("expected a snapshot after the delete");
        };
        assert!(after_delete.is_empty());
    }

    #[tokio::test]
    async fn deleting_a_missing_product_is_not_found() {
        let collection = MemoryCollection::new();
        let err = collection.delete_product(&ProductId::from("nope")).await.unwrap_err();
        assert!(matches!(err, ProductCollectionError::NotFound(_)));
    }

    #[tokio::test]
    async fn injected_errors_are_terminal() {
        let collection = MemoryCollection::with_products(vec![sample_product("p1", "Home Kit", "RedFC")]).await;
        let mut feed = collection.watch().await.unwrap();
        assert!(matches!(feed.next_event().await, Some(FeedEvent::Snapshot(_))));
        collection.inject_error(ProductCollectionError::PermissionDenied("revoked".to_string())).await;
        assert!(matches!(feed.next_event().await, Some(FeedEvent::Error(_))));
        assert!(feed.next_event().await.is_none());
    }

    #[tokio::test]
    async fn media_store_round_trips_public_ids() {
        let media = MemoryMedia::new();
        let stored = media.upload_image(vec![1, 2, 3], "home-kit.png").await.unwrap();
        assert_eq!(media.extract_public_id(&stored.url).unwrap(), stored.public_id);
        media.delete_image(&stored.public_id).await.unwrap();
        assert_eq!(media.deletions().await, vec![stored.public_id]);
    }

    #[tokio::test]
    async fn media_store_rejects_urls_without_a_version_marker() {
        let media = MemoryMedia::new();
        assert!(media.extract_public_id("https://img.test/jerseys/kit.png").is_err());
    }

    #[tokio::test]
    async fn auth_double_tracks_the_current_user() {
        let auth = MemoryAuth::new(&[("admin@jerseyhub.test", "hunter2", "uid-1")]);
        let feed = auth.watch_auth();
        assert!(feed.current().is_none());
        assert!(matches!(
            auth.sign_in("admin@jerseyhub.test", "wrong").await,
            Err(AuthProviderError::InvalidCredentials)
        ));
        let uid = auth.sign_in("admin@jerseyhub.test", "hunter2").await.unwrap();
        assert_eq!(uid, UserId::from("uid-1"));
        assert_eq!(feed.current(), Some(uid));
        auth.sign_out().await.unwrap();
        assert!(feed.current().is_none());
    }
}
