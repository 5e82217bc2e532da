//! HTTP client for the local runtime's inspection endpoint.

use std::time::Duration;

use modelsync_core::{CapabilityLookup, CapabilitySet, ModelId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::InventoryError;

/// Request body for `POST /api/show`.
#[derive(Debug, Serialize)]
struct ShowRequest<'a> {
    model: &'a str,
}

/// The part of the `/api/show` response we read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShowResponse {
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// HTTP client for the runtime API (`http://127.0.0.1:11434` by default).
#[derive(Debug, Clone)]
pub struct OllamaClient {
    inner: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl OllamaClient {
    /// Create a new client. Every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InventoryError> {
        let inner = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query `/api/show` for a model.
    pub async fn show(&self, model: &ModelId) -> Result<ShowResponse, InventoryError> {
        let url = format!("{}/api/show", self.base_url);
        debug!(url = %url, model = %model, "POST request");

        let response = self
            .inner
            .post(&url)
            .json(&ShowRequest {
                model: model.as_str(),
            })
            .send()
            .await
            .map_err(|e| self.classify(e, &url))?;

        if !response.status().is_success() {
            return Err(InventoryError::HttpStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e, &url))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Capabilities reported for a model, or `Unknown` on any failure.
    pub async fn fetch_capabilities(&self, model: &ModelId) -> CapabilityLookup {
        match self.show(model).await {
            Ok(show) => CapabilityLookup::Reported(show.capabilities.into_iter().collect::<CapabilitySet>()),
            Err(e) => {
                warn!(model = %model, error = %e, "Capability lookup failed");
                CapabilityLookup::Unknown
            }
        }
    }

    fn classify(&self, err: reqwest::Error, url: &str) -> InventoryError {
        if err.is_timeout() {
            InventoryError::Timeout {
                target: url.to_string(),
                secs: self.timeout.as_secs(),
            }
        } else {
            InventoryError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = OllamaClient::new("http://127.0.0.1:11434/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:11434");
    }

    #[test]
    fn test_show_response_parsing() {
        let show: ShowResponse = serde_json::from_str(
            r#"{"modelfile":"FROM x","capabilities":["completion","tools"],"details":{}}"#,
        )
        .unwrap();
        assert_eq!(show.capabilities, vec!["completion", "tools"]);

        let show: ShowResponse = serde_json::from_str(r#"{"modelfile":"FROM x"}"#).unwrap();
        assert!(show.capabilities.is_empty());
    }

    #[test]
    fn test_show_request_body() {
        let body = serde_json::to_value(ShowRequest { model: "llama3.2:3b" }).unwrap();
        assert_eq!(body, serde_json::json!({"model": "llama3.2:3b"}));
    }

    #[tokio::test]
    async fn test_unreachable_runtime_is_unknown() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let client = OllamaClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let lookup = client.fetch_capabilities(&ModelId::new("llama3.2:3b")).await;
        assert_eq!(lookup, CapabilityLookup::Unknown);
    }
}
