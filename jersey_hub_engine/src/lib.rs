//! JerseyHub Catalog Engine
//!
//! The catalog engine keeps a live product catalog consistent with a remote, continuously-changing document store,
//! and derives the shop's rendered views from it. It is provider-agnostic.
//!
//! The library is divided into three main sections:
//! 1. Backend traits ([`mod@traits`]). The remote document collection, the image host and the authentication
//!    provider are all external services; the engine only speaks to them through these traits. A Firestore REST
//!    backend ships behind the default `firestore` feature, and in-memory doubles live in `test_utils`.
//! 2. The catalog API ([`CatalogApi`]). This owns the subscription lifecycle: a consumer subscribes with a pair of
//!    async callbacks and receives complete catalog snapshots until the handle is cancelled or the feed errors.
//!    Writes are pass-through; the resulting snapshot arrives through the already-active subscription, so there is
//!    only ever one source of truth.
//! 3. The derived view pipeline ([`view::derive_view`]). A pure function from (snapshot, view params) to the ordered
//!    product list the shop renders. It never mutates its input and never fails on a malformed item.
//!
//! Admin flows (create with image upload, the two-phase delete) are orchestrated by [`AdminApi`], and the static
//! admin allow-list lives in [`mod@authz`].
mod api;

pub mod authz;
pub mod catalog_types;
pub mod events;
pub mod traits;
pub mod view;

#[cfg(feature = "firestore")]
pub mod firestore;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use api::{
    admin_api::{AdminApi, AdminApiError},
    auth_api::{AuthApi, AuthState},
    catalog_api::{CatalogApi, ErrorHandler, SnapshotHandler, SubscriptionHandle, SubscriptionState},
};
