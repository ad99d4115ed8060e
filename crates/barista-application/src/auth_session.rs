//! Auth session use case.
//!
//! Ties the auth API to the credential store: login fetches the profile
//! behind the fresh token and persists both; registration auto-logs-in;
//! logout clears the token and the profile together.

use tracing::info;

use barista_core::error::Result;
use barista_infrastructure::credential_storage::{CredentialStorage, StoredCredentials};
use barista_interaction::auth::{AuthBackend, NewUser, UserProfile};

pub struct AuthSession<A: AuthBackend> {
    auth: A,
    storage: CredentialStorage,
}

impl<A: AuthBackend> AuthSession<A> {
    pub fn new(auth: A, storage: CredentialStorage) -> Self {
        Self { auth, storage }
    }

    /// Logs in (the username field accepts an email too), fetches the
    /// profile behind the token, and persists both together.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile> {
        let token = self.auth.login(username, password).await?;
        let profile = self.auth.me(&token.access_token).await?;

        self.persist(&token.access_token, &profile)?;
        info!(username = %profile.username, "logged in");
        Ok(profile)
    }

    /// Registers an account and auto-logs-in with the new credentials.
    /// The stored profile is the one returned by registration.
    pub async fn register(&self, new_user: NewUser) -> Result<UserProfile> {
        let profile = self.auth.register(&new_user).await?;
        let token = self.auth.login(&new_user.username, &new_user.password).await?;

        self.persist(&token.access_token, &profile)?;
        info!(username = %profile.username, "registered and logged in");
        Ok(profile)
    }

    /// Clears the stored token and profile together.
    pub fn logout(&self) -> Result<()> {
        self.storage.clear()
    }

    /// The logged-in identity, if the store holds one. Read at mount to
    /// decide whether to attach an email to outgoing chat messages.
    pub fn current_identity(&self) -> Option<UserProfile> {
        let credentials = self.storage.load();
        credentials
            .user
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// The stored bearer token, for endpoints that need it directly.
    pub fn current_token(&self) -> Option<String> {
        self.storage.load().token
    }

    fn persist(&self, token: &str, profile: &UserProfile) -> Result<()> {
        self.storage.save(&StoredCredentials {
            token: Some(token.to_string()),
            user: Some(serde_json::to_value(profile)?),
        })
    }
}
