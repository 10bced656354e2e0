//! The derived view pipeline.
//!
//! A pure transform from (catalog snapshot, view params) to the ordered product list the shop renders. No side
//! effects, no hidden state: running it twice on the same inputs yields the same output, and the input snapshot is
//! never mutated. Malformed per-item data never fails the pipeline either; numeric fields have already degraded to
//! zero at deserialization, and a missing creation timestamp sorts as the epoch.
use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};

use crate::catalog_types::Product;

//--------------------------------------     SortKey       -----------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first, by creation timestamp. Items without one sort as the oldest possible value.
    #[default]
    Popularity,
    PriceAsc,
    PriceDesc,
    /// Highest rating first.
    Rating,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Popularity => write!(f, "popularity"),
            SortKey::PriceAsc => write!(f, "price-asc"),
            SortKey::PriceDesc => write!(f, "price-desc"),
            SortKey::Rating => write!(f, "rating"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "popularity" => Ok(SortKey::Popularity),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "rating" => Ok(SortKey::Rating),
            other => Err(format!("Unknown sort key: {other}")),
        }
    }
}

//--------------------------------------     CategoryFilter       ----------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    New,
    OnSale,
}

impl CategoryFilter {
    /// The keyword a product's tag must contain (case-insensitively) to pass this filter.
    fn keyword(&self) -> Option<&'static str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::New => Some("new"),
            CategoryFilter::OnSale => Some("sale"),
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "All"),
            CategoryFilter::New => write!(f, "New"),
            CategoryFilter::OnSale => write!(f, "On Sale"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "new" => Ok(CategoryFilter::New),
            "on sale" | "sale" => Ok(CategoryFilter::OnSale),
            other => Err(format!("Unknown category filter: {other}")),
        }
    }
}

//--------------------------------------     ViewParams       --------------------------------------------------------
/// The user-controlled search/filter/sort state driving the derived view. Ephemeral; defaults on navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub search_text: String,
    pub active_filter: CategoryFilter,
    pub sort_key: SortKey,
}

//--------------------------------------     Pipeline       ----------------------------------------------------------
/// Compute the product list to render from a snapshot and the current view params.
///
/// Stages run in a fixed order: search filter, category filter, then a stable sort whose tie-break is the order
/// produced by the filtering stages (there is no secondary sort key). The snapshot itself is untouched.
pub fn derive_view(snapshot: &[Product], params: &ViewParams) -> Vec<Product> {
    let needle = params.search_text.to_lowercase();
    let mut items: Vec<Product> = snapshot
        .iter()
        .filter(|p| matches_search(p, &needle))
        .filter(|p| matches_filter(p, &params.active_filter))
        .cloned()
        .collect();
    match params.sort_key {
        SortKey::Popularity => items.sort_by(|a, b| created_or_epoch(b).cmp(&created_or_epoch(a))),
        SortKey::PriceAsc => items.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => items.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => items.sort_by(|a, b| b.rating.cmp(&a.rating)),
    }
    items
}

/// Case-insensitive substring match against name OR team. An empty search matches everything.
fn matches_search(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(needle) || product.team.to_lowercase().contains(needle)
}

/// A product with a missing or empty tag never matches a non-default filter.
fn matches_filter(product: &Product, filter: &CategoryFilter) -> bool {
    match filter.keyword() {
        None => true,
        Some(keyword) => product.tag.to_lowercase().contains(keyword),
    }
}

fn created_or_epoch(product: &Product) -> DateTime<Utc> {
    product.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
