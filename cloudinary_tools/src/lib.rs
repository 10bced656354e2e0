//! Cloudinary client for JerseyHub
//!
//! A thin REST client for the two image-host operations the storefront needs:
//! * unsigned uploads from the admin create-product flow (file + upload preset), and
//! * signed deletions, which require the account's API secret and therefore must only ever run server-side.
//!
//! The crate also owns the parsing of Cloudinary delivery URLs, since the public id embedded in them is the handle
//! needed for deletion.
mod api;
mod config;
pub mod data_objects;
mod error;
pub mod helpers;

pub use api::CloudinaryApi;
pub use config::CloudinaryConfig;
pub use data_objects::{DestroyResponse, UploadResponse};
pub use error::CloudinaryApiError;
pub use helpers::extract_public_id;
