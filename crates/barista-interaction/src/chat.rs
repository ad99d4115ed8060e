//! HTTP chat backend client.
//!
//! Wire shapes:
//! - `POST {api_base}/chat` with the message and the full session context;
//!   every response field except `response` is optional, and a mis-shaped
//!   optional field reads as absent rather than failing the decode.
//! - `GET {api_base}/models` returning the provider -> model-list catalog.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use barista_core::catalog::ModelCatalog;
use barista_core::config::WidgetConfig;
use barista_core::error::{BaristaError, Result};
use barista_core::message::ContentBlock;

/// Advisory user context forwarded with every chat request.
#[derive(Debug, Clone, Serialize)]
pub struct UserContext {
    pub tier: String,
    pub location: String,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    pub agent_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Present only when a logged-in identity is known at send time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub user_context: UserContext,
}

/// Body of a successful `POST /chat` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default, deserialize_with = "lenient")]
    pub content_blocks: Option<Vec<ContentBlock>>,
    #[serde(default)]
    pub structured_output: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub intent: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub confidence: Option<f64>,
}

/// Decodes an optional field, reading a mis-shaped value as absent.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// The remote chat service, abstracted for testing.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one message and returns the backend's reply.
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Fetches the provider -> model-list catalog.
    async fn fetch_models(&self) -> Result<ModelCatalog>;
}

/// `ChatBackend` implementation over HTTP.
#[derive(Clone)]
pub struct HttpChatBackend {
    client: Client,
    api_base: String,
}

impl HttpChatBackend {
    /// Builds a client for the configured backend. Unlike the source
    /// widget, every request carries an explicit timeout; a hung backend
    /// surfaces as an ordinary send failure instead of pending forever.
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

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        tracing::debug!(
            session_id = %request.session_id,
            agent_type = %request.agent_type,
            "sending chat message"
        );

        let response = self
            .client
            .post(self.url("chat"))
            .json(request)
            .send()
            .await
            .map_err(|err| BaristaError::transport(format!("chat request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(BaristaError::http(status.as_u16(), body));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|err| BaristaError::transport(format!("malformed chat response: {err}")))
    }

    async fn fetch_models(&self) -> Result<ModelCatalog> {
        let response = self
            .client
            .get(self.url("models"))
            .send()
            .await
            .map_err(|err| BaristaError::transport(format!("models request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BaristaError::http(status.as_u16(), "models fetch failed"));
        }

        response
            .json::<ModelCatalog>()
            .await
            .map_err(|err| BaristaError::transport(format!("malformed models response: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_skips_absent_optional_fields() {
        let request = ChatRequest {
            message: "a latte please".to_string(),
            session_id: "s-1".to_string(),
            agent_type: "modern".to_string(),
            model_provider: None,
            model_name: None,
            user_email: None,
            user_context: UserContext {
                tier: "basic".to_string(),
                location: "main_branch".to_string(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("user_email").is_none());
        assert!(json.get("model_provider").is_none());
        assert_eq!(json["user_context"]["location"], "main_branch");
    }

    #[test]
    fn test_request_carries_identity_when_present() {
        let request = ChatRequest {
            message: "the usual".to_string(),
            session_id: "s-2".to_string(),
            agent_type: "advanced".to_string(),
            model_provider: Some("gemini".to_string()),
            model_name: Some("g1".to_string()),
            user_email: Some("kim@example.com".to_string()),
            user_context: UserContext {
                tier: "premium".to_string(),
                location: "main_branch".to_string(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["user_email"], "kim@example.com");
        assert_eq!(json["model_name"], "g1");
    }

    #[test]
    fn test_response_with_only_required_field() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"response": "Here is your espresso."}"#).unwrap();
        assert_eq!(response.response, "Here is your espresso.");
        assert!(response.content_blocks.is_none());
        assert!(response.intent.is_none());
        assert!(response.confidence.is_none());
    }

    #[test]
    fn test_mis_shaped_optional_fields_read_as_absent() {
        let response: ChatResponse = serde_json::from_str(
            r#"{
                "response": "ok",
                "content_blocks": "not a list",
                "confidence": "high",
                "intent": 42
            }"#,
        )
        .unwrap();
        assert!(response.content_blocks.is_none());
        assert!(response.confidence.is_none());
        assert!(response.intent.is_none());
    }

    #[test]
    fn test_response_with_typed_blocks() {
        let response: ChatResponse = serde_json::from_str(
            r#"{
                "response": "done",
                "content_blocks": [
                    {"type": "reasoning", "reasoning": "checking stock"},
                    {"type": "text", "text": "We have it!"}
                ],
                "intent": "order",
                "confidence": 0.92
            }"#,
        )
        .unwrap();

        let blocks = response.content_blocks.unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(response.intent.as_deref(), Some("order"));
        assert_eq!(response.confidence, Some(0.92));
    }
}
