//! Ordering API submission client.
//!
//! Transient failures (transport errors, 5xx) retry with exponential
//! backoff up to the configured attempt limit; client errors fail fast.

use std::time::Duration;

use demex_core::{ApiConfig, DeviceOrder};
use tracing::{debug, warn};

/// Client for the external ordering API.
pub struct OrderApiClient {
    endpoint: String,
    api_key: Option<String>,
    max_retries: u32,
    base_delay: Duration,
    client: reqwest::Client,
}

impl OrderApiClient {
    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let endpoint = config.endpoint.clone().ok_or_else(|| {
            anyhow::anyhow!("no ordering API endpoint configured (set api.endpoint or DEMEX_API_ENDPOINT)")
        })?;

        Ok(Self {
            endpoint,
            api_key: config.api_key.clone(),
            max_retries: config.max_retries.max(1),
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            client: reqwest::Client::new(),
        })
    }

    /// Submit one order as the flattened JSON payload.
    pub async fn submit(&self, order: &DeviceOrder) -> anyhow::Result<()> {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let mut request = self.client.post(&self.endpoint).json(order);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(status = %response.status(), "order accepted");
                    return Ok(());
                }
                Ok(response) if response.status().is_client_error() => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    anyhow::bail!("ordering API rejected the order: HTTP {status}: {body}");
                }
                Ok(response) => {
                    last_error =
                        Some(anyhow::anyhow!("ordering API returned HTTP {}", response.status()));
                }
                Err(e) => {
                    last_error = Some(anyhow::anyhow!("request failed: {e}"));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: base, 2x base, 4x base, ...
                let delay = self.base_delay * 2u32.pow(attempts - 1);
                warn!(attempt = attempts, ?delay, "submission failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("submission retries exhausted")))
    }
}
