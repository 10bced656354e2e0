//! The Firestore REST value codec.
//!
//! Firestore wraps every field in a typed envelope (`{"stringValue": ...}`, `{"doubleValue": ...}`, and so on).
//! Decoding is deliberately lenient: a missing or oddly-typed field degrades to its default rather than failing the
//! document, because one bad field must never drop a product from the catalog.
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::catalog_types::{Product, ProductDocument, ProductId};

#[derive(Debug, Clone, Deserialize)]
pub struct FirestoreDocument {
    /// The full resource name; the document id is its last path segment.
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl FirestoreDocument {
    pub fn document_id(&self) -> ProductId {
        ProductId::from(self.name.rsplit('/').next().unwrap_or(self.name.as_str()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<FirestoreDocument>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

pub fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(|v| v.get("stringValue"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Accepts `doubleValue`, `integerValue` (which Firestore sends as a string) and even a numeric `stringValue`.
pub fn number_field(fields: &Map<String, Value>, key: &str) -> f64 {
    let Some(value) = fields.get(key) else {
        return 0.0;
    };
    if let Some(n) = value.get("doubleValue").and_then(Value::as_f64) {
        return n;
    }
    if let Some(s) = value.get("integerValue").and_then(Value::as_str) {
        return s.parse().unwrap_or(0.0);
    }
    value.get("stringValue").and_then(Value::as_str).and_then(|s| s.parse().ok()).unwrap_or(0.0)
}

pub fn timestamp_field(fields: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    fields
        .get(key)
        .and_then(|v| v.get("timestampValue"))
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<DateTime<Utc>>().ok())
}

/// Decode a Firestore document into a [`Product`]. Never fails; broken fields take their defaults.
pub fn product_from_document(doc: &FirestoreDocument) -> Product {
    let fields = &doc.fields;
    Product {
        id: doc.document_id(),
        name: string_field(fields, "name"),
        team: string_field(fields, "team"),
        brand: string_field(fields, "brand"),
        tag: string_field(fields, "tag"),
        alt_text: string_field(fields, "altText"),
        price: number_field(fields, "price").into(),
        rating: number_field(fields, "rating").into(),
        image_url: string_field(fields, "imageUrl"),
        created_at: timestamp_field(fields, "createdAt"),
    }
}

/// Encode a new product document as a Firestore `{"fields": ...}` create body.
pub fn document_fields(doc: &ProductDocument) -> Value {
    json!({
        "fields": {
            "name": { "stringValue": doc.name },
            "team": { "stringValue": doc.team },
            "brand": { "stringValue": doc.brand },
            "tag": { "stringValue": doc.tag },
            "altText": { "stringValue": doc.alt_text },
            "price": { "doubleValue": doc.price.rupees() },
            "rating": { "doubleValue": doc.rating.value() },
            "imageUrl": { "stringValue": doc.image_url },
            "createdAt": { "timestampValue": doc.created_at.to_rfc3339() },
        }
    })
}
