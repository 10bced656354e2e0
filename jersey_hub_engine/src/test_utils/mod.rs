//! In-memory doubles for the backend traits, plus small helpers shared by the test suites.
//!
//! Enable with the `test_utils` feature to use these from other crates' tests.
mod memory;

use chrono::Utc;
pub use memory::{MemoryAuth, MemoryCollection, MemoryMedia};

use crate::catalog_types::Product;

/// Load `.env` and initialise logging for a test binary. Safe to call more than once.
pub fn setup_logging() {
    dotenvy::dotenv().ok();
    let _ = env_logger::try_init();
}

/// A minimal valid product for tests. Optional fields are left at their defaults.
pub fn sample_product(id: &str, name: &str, team: &str) -> Product {
    Product {
        id: id.into(),
        name: name.to_string(),
        team: team.to_string(),
        brand: String::new(),
        tag: String::new(),
        alt_text: format!("{name} for {team}"),
        price: Default::default(),
        rating: Default::default(),
        image_url: format!("https://img.test/v1/jerseys/{id}.png"),
        created_at: Some(Utc::now()),
    }
}
