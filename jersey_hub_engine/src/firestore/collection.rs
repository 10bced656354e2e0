use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{Client, Response, StatusCode};
use tokio::time::sleep;

use crate::{
    catalog_types::{Product, ProductDocument, ProductId},
    events::{snapshot_channel, SnapshotFeed, SnapshotSender},
    firestore::{
        config::FirestoreConfig,
        values::{document_fields, product_from_document, FirestoreDocument, ListDocumentsResponse},
    },
    traits::{ProductCollection, ProductCollectionError},
};

const PAGE_SIZE: usize = 300;
/// Consecutive poll failures tolerated before the feed is declared dead.
const MAX_POLL_FAILURES: usize = 3;

/// The product collection, backed by the Firestore REST API.
#[derive(Clone)]
pub struct FirestoreCollection {
    config: Arc<FirestoreConfig>,
    client: Arc<Client>,
    path: String,
}

impl FirestoreCollection {
    pub fn new(config: FirestoreConfig) -> Result<Self, ProductCollectionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ProductCollectionError::Backend(format!("Could not build the HTTP client. {e}")))?;
        let path = config.collection_path();
        Ok(Self { config: Arc::new(config), client: Arc::new(client), path })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.config.documents_url(), self.path)
    }

    fn document_url(&self, id: &ProductId) -> String {
        format!("{}/{id}", self.collection_url())
    }

    async fn check(&self, response: Response) -> Result<Response, ProductCollectionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => Err(ProductCollectionError::PermissionDenied(body)),
            StatusCode::NOT_FOUND => Err(ProductCollectionError::Backend(body)),
            _ => Err(ProductCollectionError::Backend(format!("{status}: {body}"))),
        }
    }

    /// One polling pass: re-read the collection and publish if the list changed since `last`.
    async fn poll_once(
        &self,
        sender: &SnapshotSender,
        last: &mut Option<Vec<Product>>,
        failures: &mut usize,
    ) -> bool {
        match self.fetch_all().await {
            Ok(products) => {
                *failures = 0;
                if last.as_ref() != Some(&products) {
                    trace!("🔥️ Collection changed. Publishing a snapshot of {} product(s).", products.len());
                    if !sender.publish_snapshot(products.clone()).await {
                        return false;
                    }
                    *last = Some(products);
                }
                true
            },
            Err(e @ ProductCollectionError::PermissionDenied(_)) => {
                warn!("🔥️ Access to {} was denied. Closing the feed. {e}", self.path);
                sender.clone().publish_error(e).await;
                false
            },
            Err(e) => {
                *failures += 1;
                if *failures >= MAX_POLL_FAILURES {
                    warn!("🔥️ {failures} consecutive poll failures on {}. Closing the feed. {e}", self.path);
                    sender.clone().publish_error(e).await;
                    return false;
                }
                debug!("🔥️ Poll failure {failures}/{MAX_POLL_FAILURES} on {}. Will retry. {e}", self.path);
                true
            },
        }
    }
}

impl ProductCollection for FirestoreCollection {
    fn path(&self) -> &str {
        &self.path
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, ProductCollectionError> {
        let mut products = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page_size = PAGE_SIZE.to_string();
            let mut request = self
                .client
                .get(self.collection_url())
                .query(&[("key", self.config.api_key.reveal().as_str()), ("pageSize", page_size.as_str())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }
            let response =
                request.send().await.map_err(|e| ProductCollectionError::Network(e.to_string()))?;
            let page: ListDocumentsResponse = self
                .check(response)
                .await?
                .json()
                .await
                .map_err(|e| ProductCollectionError::Decode(e.to_string()))?;
            products.extend(page.documents.iter().map(product_from_document));
            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }
        Ok(products)
    }

    async fn add_product(&self, document: ProductDocument) -> Result<ProductId, ProductCollectionError> {
        let response = self
            .client
            .post(self.collection_url())
            .query(&[("key", self.config.api_key.reveal().as_str())])
            .json(&document_fields(&document))
            .send()
            .await
            .map_err(|e| ProductCollectionError::Network(e.to_string()))?;
        let created: FirestoreDocument = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(|e| ProductCollectionError::Decode(e.to_string()))?;
        let id = created.document_id();
        debug!("🔥️ Document {id} created in {}.", self.path);
        Ok(id)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductCollectionError> {
        let response = self
            .client
            .delete(self.document_url(id))
            .query(&[("key", self.config.api_key.reveal().as_str())])
            .send()
            .await
            .map_err(|e| ProductCollectionError::Network(e.to_string()))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProductCollectionError::NotFound(id.clone()));
        }
        self.check(response).await?;
        debug!("🔥️ Document {id} deleted from {}.", self.path);
        Ok(())
    }

    async fn watch(&self) -> Result<SnapshotFeed, ProductCollectionError> {
        // The REST surface has no listen channel, so the feed is a poller that publishes on change. The first pass
        // always publishes, so a new subscriber sees the current state promptly.
        let (sender, feed) = snapshot_channel(8);
        let this = self.clone();
        let interval = self.config.poll_interval;
        tokio::spawn(async move {
            info!("🔥️ Watching {} (poll interval {interval:?}).", this.path);
            let mut last: Option<Vec<Product>> = None;
            let mut failures = 0usize;
            loop {
                if sender.is_closed() {
                    debug!("🔥️ The feed on {} was dropped. Stopping the poller.", this.path);
                    break;
                }
                if !this.poll_once(&sender, &mut last, &mut failures).await {
                    break;
                }
                sleep(interval).await;
            }
        });
        Ok(feed)
    }
}
