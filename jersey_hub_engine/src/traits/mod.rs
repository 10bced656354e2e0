//! # External service contracts.
//!
//! Every data operation in the storefront is a call to a hosted third-party service: the document collection that
//! owns the products, the image host that owns the jersey photos, and the authentication provider that owns user
//! identity. This module defines the interface contracts those services must satisfy, so that the engine's APIs can
//! be exercised against test doubles and so that no remote-client singleton leaks into the core logic.
//!
//! * [`ProductCollection`] is the remote product collection: full reads, pass-through writes, and a change feed
//!   that delivers complete catalog snapshots.
//! * [`MediaStore`] is the image host: upload, delete-by-public-id, and the parsing of its delivery URLs.
//! * [`AuthProvider`] is the authentication service: credential sign-in/out and a "current user changed" stream.
mod auth_provider;
mod media_store;
mod product_collection;

pub use auth_provider::{AuthFeed, AuthProvider, AuthProviderError};
pub use media_store::{MediaStore, MediaStoreError, StoredImage};
pub use product_collection::{ProductCollection, ProductCollectionError};
