use thiserror::Error;

use crate::{
    catalog_types::{Product, ProductDocument, ProductId},
    events::SnapshotFeed,
};

#[derive(Debug, Clone, Error)]
pub enum ProductCollectionError {
    #[error("Permission denied by the remote store. {0}")]
    PermissionDenied(String),
    #[error("Network error talking to the remote store. {0}")]
    Network(String),
    #[error("The remote store rejected the request. {0}")]
    Backend(String),
    #[error("Could not decode a product document. {0}")]
    Decode(String),
    #[error("No product with id {0}")]
    NotFound(ProductId),
}

/// The remote product collection backing the catalog.
///
/// The collection is the single source of truth: the engine never keeps a writable copy. A full read via
/// [`fetch_all`](ProductCollection::fetch_all) must always be able to rebuild the snapshot from scratch; no
/// incremental-only recovery path is assumed reliable.
#[allow(async_fn_in_trait)]
pub trait ProductCollection: Clone {
    /// The logical path of the backing collection. Diagnostics only.
    fn path(&self) -> &str;

    /// Read the complete collection.
    async fn fetch_all(&self) -> Result<Vec<Product>, ProductCollectionError>;

    /// Write a new product document. The store assigns and returns the id.
    async fn add_product(&self, document: ProductDocument) -> Result<ProductId, ProductCollectionError>;

    /// Delete the document with the given id.
    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductCollectionError>;

    /// Open a change feed against the collection.
    ///
    /// Every remote mutation, whether made through this client or another, delivers the complete materialized
    /// product list on the feed, never a diff. Deliveries on one feed are totally ordered and each reflects the
    /// most recent remote state as of delivery; intermediate states may be coalesced, but never reordered. A feed
    /// error is terminal: no snapshot follows it.
    async fn watch(&self) -> Result<SnapshotFeed, ProductCollectionError>;
}
