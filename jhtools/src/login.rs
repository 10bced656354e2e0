use anyhow::{anyhow, Result};
use dialoguer::{Input, Password};
use jersey_hub_engine::{
    authz::AdminAllowList,
    firestore::{FirebaseAuth, FirestoreConfig},
    AuthApi,
    AuthState,
};

/// Prompt for credentials, sign in against the auth provider and report the session state.
pub async fn login() -> Result<()> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;
    let config = FirestoreConfig::new_from_env_or_default();
    let provider = FirebaseAuth::new(config).map_err(|e| anyhow!("Error creating the auth client: {e}"))?;
    let admins = AdminAllowList::from_csv(&std::env::var("JH_ADMIN_UIDS").unwrap_or_default());
    let api = AuthApi::new(provider, admins);
    match api.sign_in(&email, &password).await {
        Ok(AuthState::SignedIn { user_id, is_admin }) => {
            println!("Signed in as {user_id}.");
            if is_admin {
                println!("This account has admin rights.");
            } else {
                println!("This account does NOT have admin rights.");
            }
            Ok(())
        },
        Ok(AuthState::SignedOut) => Err(anyhow!("Sign-in did not produce a session")),
        Err(e) => Err(anyhow!("Sign-in failed: {e}")),
    }
}
