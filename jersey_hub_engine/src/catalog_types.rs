use std::fmt::Display;

use chrono::{DateTime, Utc};
use jh_common::{Price, Rating};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//--------------------------------------     ProductId       ---------------------------------------------------------
/// The remote store's opaque identifier for a product document. Assigned on creation and stable for the product's
/// lifetime; uniqueness is the store's guarantee, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for ProductId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

//--------------------------------------     UserId       ------------------------------------------------------------
/// An opaque user identifier from the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for UserId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

//--------------------------------------     Product       -----------------------------------------------------------
/// A product as mirrored from the remote collection.
///
/// Only `name`, `team` and `alt_text` are required at creation; everything else may be absent on older documents,
/// so the numeric fields deserialize leniently (malformed values become zero, see [`Price`] and [`Rating`]) and
/// `created_at` is optional. An item is never dropped because one of its fields is broken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub team: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn from_document(id: ProductId, doc: ProductDocument) -> Self {
        Self {
            id,
            name: doc.name,
            team: doc.team,
            brand: doc.brand,
            tag: doc.tag,
            alt_text: doc.alt_text,
            price: doc.price,
            rating: doc.rating,
            image_url: doc.image_url,
            created_at: Some(doc.created_at),
        }
    }
}

//--------------------------------------     NewProduct       --------------------------------------------------------
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Required field is missing or blank: {0}")]
pub struct ValidationError(pub String);

/// The admin form payload for a new product: everything except the image and the store-assigned fields.
///
/// Validation runs before any network call, so a bad form never costs an image upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub team: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub rating: Rating,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("name", &self.name), ("team", &self.team), ("altText", &self.alt_text)] {
            if value.trim().is_empty() {
                return Err(ValidationError(field.to_string()));
            }
        }
        Ok(())
    }
}

//--------------------------------------     ProductDocument       ---------------------------------------------------
/// Everything that gets written to the remote collection for a product: the validated form fields plus the image
/// URL produced by the upload step and the creation timestamp. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    pub name: String,
    pub team: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub rating: Rating,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl ProductDocument {
    pub fn new(form: NewProduct, image_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            name: form.name,
            team: form.team,
            brand: form.brand,
            tag: form.tag,
            alt_text: form.alt_text,
            price: form.price,
            rating: form.rating,
            image_url,
            created_at,
        }
    }
}
