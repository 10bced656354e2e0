//! Sign-in state, folded together with the admin allow-list.
use log::*;

use crate::{
    authz::AdminAllowList,
    catalog_types::UserId,
    traits::{AuthFeed, AuthProvider, AuthProviderError},
};

/// What the UI needs to know about the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    SignedOut,
    SignedIn { user_id: UserId, is_admin: bool },
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthState::SignedIn { is_admin: true, .. })
    }
}

/// An [`AuthProvider`] combined with the static allow-list, yielding [`AuthState`] instead of bare user ids.
#[derive(Clone)]
pub struct AuthApi<A> {
    provider: A,
    admins: AdminAllowList,
}

impl<A: AuthProvider> AuthApi<A> {
    pub fn new(provider: A, admins: AdminAllowList) -> Self {
        Self { provider, admins }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthState, AuthProviderError> {
        let user_id = self.provider.sign_in(email, password).await?;
        let state = self.state_for(Some(user_id));
        if state.is_admin() {
            info!("🔐️ An admin signed in.");
        }
        Ok(state)
    }

    pub async fn sign_out(&self) -> Result<(), AuthProviderError> {
        self.provider.sign_out().await
    }

    pub fn state_for(&self, user: Option<UserId>) -> AuthState {
        match user {
            None => AuthState::SignedOut,
            Some(user_id) => {
                let is_admin = self.admins.contains(&user_id);
                AuthState::SignedIn { user_id, is_admin }
            },
        }
    }

    /// The current session state, derived from the provider's feed without waiting.
    pub fn current_state(&self) -> AuthState {
        self.state_for(self.provider.watch_auth().current())
    }

    pub fn watch(&self) -> AuthFeed {
        self.provider.watch_auth()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::MemoryAuth;

    fn api() -> AuthApi<MemoryAuth> {
        let provider = MemoryAuth::new(&[
            ("admin@jerseyhub.test", "hunter2", "uid-admin"),
            ("shopper@jerseyhub.test", "hunter2", "uid-shopper"),
        ]);
        AuthApi::new(provider, AdminAllowList::from_csv("uid-admin"))
    }

    #[tokio::test]
    async fn allow_listed_users_are_admins() {
        let api = api();
        let state = api.sign_in("admin@jerseyhub.test", "hunter2").await.unwrap();
        assert!(state.is_admin());
        assert_eq!(api.current_state(), state);
    }

    #[tokio::test]
    async fn other_users_sign_in_without_admin_rights() {
        let api = api();
        let state = api.sign_in("shopper@jerseyhub.test", "hunter2").await.unwrap();
        assert_eq!(state, AuthState::SignedIn { user_id: UserId::from("uid-shopper"), is_admin: false });
        api.sign_out().await.unwrap();
        assert_eq!(api.current_state(), AuthState::SignedOut);
    }

    #[tokio::test]
    async fn bad_credentials_are_rejected() {
        let api = api();
        assert!(matches!(
            api.sign_in("admin@jerseyhub.test", "wrong").await,
            Err(AuthProviderError::InvalidCredentials)
        ));
        assert_eq!(api.current_state(), AuthState::SignedOut);
    }
}
