//! Auth API client.
//!
//! The backend issues and verifies tokens; this client only carries them.
//! Login is form-encoded (OAuth2 password form, username field accepts an
//! email too), registration is JSON.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use barista_core::config::WidgetConfig;
use barista_core::error::{BaristaError, Result};

/// Token payload returned by `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
}

/// User profile as `GET /auth/me` and `POST /auth/register` return it.
/// Tolerant of partial payloads; only email and username are relied on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub password: String,
}

/// The remote auth service, abstracted for testing.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Token>;
    async fn me(&self, token: &str) -> Result<UserProfile>;
    async fn register(&self, new_user: &NewUser) -> Result<UserProfile>;
}

#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    api_base: String,
}

impl AuthClient {
    pub fn new(config: &WidgetConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| BaristaError::config(format!("HTTP client setup failed: {err}")))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AuthBackend for AuthClient {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<Token> {
        let response = self
            .client
            .post(format!("{}/auth/login", self.api_base))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|err| BaristaError::transport(format!("login request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = error_detail(response).await;
            return Err(BaristaError::auth(detail));
        }

        response
            .json::<Token>()
            .await
            .map_err(|err| BaristaError::transport(format!("malformed login response: {err}")))
    }

    /// Fetches the profile behind a bearer token.
    async fn me(&self, token: &str) -> Result<UserProfile> {
        let response = self
            .client
            .get(format!("{}/auth/me", self.api_base))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| BaristaError::transport(format!("profile request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BaristaError::auth(format!(
                "profile fetch rejected ({status})"
            )));
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|err| BaristaError::transport(format!("malformed profile response: {err}")))
    }

    /// Creates an account. The caller is expected to follow up with
    /// `login` (the client auto-logs-in after registration).
    async fn register(&self, new_user: &NewUser) -> Result<UserProfile> {
        let response = self
            .client
            .post(format!("{}/auth/register", self.api_base))
            .json(new_user)
            .send()
            .await
            .map_err(|err| BaristaError::transport(format!("register request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = error_detail(response).await;
            return Err(BaristaError::auth(detail));
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|err| BaristaError::transport(format!("malformed register response: {err}")))
    }
}

/// Pulls the backend's `detail` message out of an error body when present.
async fn error_detail(response: reqwest::Response) -> String {
    #[derive(Deserialize)]
    struct Detail {
        detail: String,
    }

    let status = response.status();
    match response.json::<Detail>().await {
        Ok(body) => body.detail,
        Err(_) => format!("request rejected ({status})"),
    }
}
