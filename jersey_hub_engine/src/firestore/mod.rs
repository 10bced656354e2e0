//! Firestore REST backend.
//!
//! Implements [`ProductCollection`](crate::traits::ProductCollection) and
//! [`AuthProvider`](crate::traits::AuthProvider) against the Firestore and Identity Toolkit REST APIs. The REST
//! surface has no server-push listen channel, so the change feed is a poller that re-reads the collection and
//! publishes only when the materialized list actually changed. Intermediate states may be coalesced between polls;
//! ordering and freshness of what IS delivered are preserved.
mod auth;
mod collection;
mod config;
mod values;

pub use auth::FirebaseAuth;
pub use collection::FirestoreCollection;
pub use config::FirestoreConfig;
