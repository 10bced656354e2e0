use thiserror::Error;
use tokio::sync::watch;

use crate::catalog_types::UserId;

#[derive(Debug, Clone, Error)]
pub enum AuthProviderError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Network error talking to the auth provider. {0}")]
    Network(String),
    #[error("The auth provider rejected the request. {0}")]
    Backend(String),
}

/// A "current user changed" stream: `Some(user)` after sign-in, `None` after sign-out.
///
/// Backed by a tokio watch channel, so a late subscriber sees the current value immediately and intermediate
/// states may be skipped. Only the freshest auth state matters.
#[derive(Debug, Clone)]
pub struct AuthFeed {
    receiver: watch::Receiver<Option<UserId>>,
}

impl AuthFeed {
    pub fn new(receiver: watch::Receiver<Option<UserId>>) -> Self {
        Self { receiver }
    }

    /// The current user, without waiting for a change.
    pub fn current(&self) -> Option<UserId> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next auth-state change. Returns `None` once the provider has gone away.
    pub async fn changed(&mut self) -> Option<Option<UserId>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

/// The hosted authentication service.
#[allow(async_fn_in_trait)]
pub trait AuthProvider: Clone {
    /// Sign in with an email/password credential, returning the provider's opaque user id.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, AuthProviderError>;

    async fn sign_out(&self) -> Result<(), AuthProviderError>;

    fn watch_auth(&self) -> AuthFeed;
}
