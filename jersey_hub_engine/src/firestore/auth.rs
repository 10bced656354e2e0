use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::watch;

use crate::{
    catalog_types::UserId,
    firestore::config::FirestoreConfig,
    traits::{AuthFeed, AuthProvider, AuthProviderError},
};

const SIGN_IN_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
}

/// Email/password authentication via the Identity Toolkit REST API.
#[derive(Clone)]
pub struct FirebaseAuth {
    config: Arc<FirestoreConfig>,
    client: Arc<Client>,
    sender: Arc<watch::Sender<Option<UserId>>>,
    receiver: watch::Receiver<Option<UserId>>,
}

impl FirebaseAuth {
    pub fn new(config: FirestoreConfig) -> Result<Self, AuthProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AuthProviderError::Backend(format!("Could not build the HTTP client. {e}")))?;
        let (sender, receiver) = watch::channel(None);
        Ok(Self { config: Arc::new(config), client: Arc::new(client), sender: Arc::new(sender), receiver })
    }
}

impl AuthProvider for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, AuthProviderError> {
        let response = self
            .client
            .post(SIGN_IN_URL)
            .query(&[("key", self.config.api_key.reveal().as_str())])
            .json(&json!({ "email": email, "password": password, "returnSecureToken": true }))
            .send()
            .await
            .map_err(|e| AuthProviderError::Network(e.to_string()))?;
        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            // Identity Toolkit reports bad credentials as a 400 with an error code in the body.
            return Err(AuthProviderError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthProviderError::Backend(format!("{status}: {body}")));
        }
        let body: SignInResponse = response.json().await.map_err(|e| AuthProviderError::Backend(e.to_string()))?;
        let user_id = UserId::from(body.local_id);
        debug!("🔐️ User {user_id} signed in.");
        let _ = self.sender.send(Some(user_id.clone()));
        Ok(user_id)
    }

    async fn sign_out(&self) -> Result<(), AuthProviderError> {
        debug!("🔐️ Signed out.");
        let _ = self.sender.send(None);
        Ok(())
    }

    fn watch_auth(&self) -> AuthFeed {
        AuthFeed::new(self.receiver.clone())
    }
}
