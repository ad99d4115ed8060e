//! Orders API client. Display-only: records pass through to rendering.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use barista_core::config::WidgetConfig;
use barista_core::error::{BaristaError, Result};

/// One past order as the backend returns it. Fields beyond `id` are
/// tolerated as absent so older backend snapshots still render.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub items: Option<serde_json::Value>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone)]
pub struct OrdersClient {
    client: Client,
    api_base: String,
}

impl OrdersClient {
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

    /// Fetches the logged-in user's order history, newest first.
    pub async fn my_orders(&self, token: &str) -> Result<Vec<OrderRecord>> {
        let response = self
            .client
            .get(format!("{}/my-orders", self.api_base))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| BaristaError::transport(format!("orders request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BaristaError::http(status.as_u16(), "orders fetch failed"));
        }

        response
            .json::<Vec<OrderRecord>>()
            .await
            .map_err(|err| BaristaError::transport(format!("malformed orders response: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_record_tolerates_sparse_fields() {
        let records: Vec<OrderRecord> =
            serde_json::from_str(r#"[{"id": 7}, {"status": "completed", "total": 9.5}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, Some(7));
        assert_eq!(records[1].status.as_deref(), Some("completed"));
        assert!(records[1].id.is_none());
    }
}
