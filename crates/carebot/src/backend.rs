use reqwest::Client;
use serde_json::Value;

use crate::config::BackendConfig;
use crate::errors::{ToolError, ToolResult};

/// Client for the backend's HTTP functions.
///
/// Each call is a single POST with no retry and no timeout: a request that
/// never answers leaves the caller waiting.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// POST `body` to a function endpoint and return the decoded response
    pub async fn invoke(&self, endpoint: &str, body: &Value) -> ToolResult<Value> {
        let url = self.config.function_url(endpoint);
        tracing::info!(%url, "calling backend function");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.anon_key))
            .json(body)
            .send()
            .await
            .map_err(|e| ToolError::ExecutionError(format!("Request to {} failed: {}", endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(%status, endpoint, "backend function failed");
            return Err(ToolError::ExecutionError(format!(
                "Backend function {} returned {}: {}",
                endpoint, status, detail
            )));
        }

        response.json().await.map_err(|e| {
            ToolError::ExecutionError(format!("Invalid JSON from {}: {}", endpoint, e))
        })
    }
}
