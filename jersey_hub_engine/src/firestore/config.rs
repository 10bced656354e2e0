use std::{env, time::Duration};

use jh_common::Secret;
use log::*;

pub const DEFAULT_PROJECT_ID: &str = "jerseyhub-demo";
pub const DEFAULT_APP_ID: &str = "jerseyhub";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    /// The web API key. Sent as a query parameter on every call.
    pub api_key: Secret<String>,
    /// Namespaces the product collection path.
    pub app_id: String,
    pub poll_interval: Duration,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            api_key: Secret::default(),
            app_id: DEFAULT_APP_ID.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl FirestoreConfig {
    /// Read the configuration from `JH_FIREBASE_PROJECT_ID`, `JH_FIREBASE_API_KEY`, `JH_APP_ID` and
    /// `JH_CATALOG_POLL_INTERVAL_SECS`, falling back to defaults with a warning for anything unset.
    pub fn new_from_env_or_default() -> Self {
        let project_id = env::var("JH_FIREBASE_PROJECT_ID").unwrap_or_else(|_| {
            warn!("🪛️ JH_FIREBASE_PROJECT_ID is not set. Using the default, {DEFAULT_PROJECT_ID}.");
            DEFAULT_PROJECT_ID.to_string()
        });
        let api_key = env::var("JH_FIREBASE_API_KEY").map(Secret::new).unwrap_or_else(|_| {
            warn!("🪛️ JH_FIREBASE_API_KEY is not set. Firestore calls will be unauthenticated.");
            Secret::default()
        });
        let app_id = env::var("JH_APP_ID").unwrap_or_else(|_| {
            warn!("🪛️ JH_APP_ID is not set. Using the default, {DEFAULT_APP_ID}.");
            DEFAULT_APP_ID.to_string()
        });
        let poll_interval = env::var("JH_CATALOG_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| {
                warn!(
                    "🪛️ JH_CATALOG_POLL_INTERVAL_SECS is not set or invalid. Using the default, \
                     {DEFAULT_POLL_INTERVAL_SECS}s."
                );
                Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
            });
        Self { project_id, api_key, app_id, poll_interval }
    }

    /// The public product collection path, namespaced under the app id.
    pub fn collection_path(&self) -> String {
        format!("artifacts/{}/public/data/products", self.app_id)
    }

    /// The REST root for this project's default database.
    pub fn documents_url(&self) -> String {
        format!("https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents", self.project_id)
    }
}
