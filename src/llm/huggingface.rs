use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{RefineError, Result};
use crate::models::ProviderConfig;

use super::ProviderAdapter;

/// HuggingFace inference client
///
/// Public models answer without a token, gated ones need it; the auth mode is
/// chosen per call through [`ProviderConfig::use_auth`].
pub struct HuggingFaceClient {
    client: Client,
    api_token: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(api_token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RefineError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, api_token })
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }
}

#[async_trait]
impl ProviderAdapter for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn call(&self, config: &ProviderConfig, payload: &Value) -> Option<Value> {
        let mut request = self.client.post(&config.endpoint).json(payload);

        if config.use_auth {
            match &self.api_token {
                Some(token) => request = request.bearer_auth(token),
                None => {
                    warn!(
                        "HF call to {} skipped: auth requested but no API token configured",
                        config.model_id
                    );
                    return None;
                }
            }
        }

        debug!("HF request to {} (auth={})", config.model_id, config.auth_mode());

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    "HF request failed for {} (auth={}): {}",
                    config.model_id,
                    config.auth_mode(),
                    e
                );
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "HF API error for {} (auth={}): {} - {}",
                config.model_id,
                config.auth_mode(),
                status,
                body
            );
            return None;
        }

        match response.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                error!(
                    "HF response from {} (auth={}, status {}) is not valid JSON: {}",
                    config.model_id,
                    config.auth_mode(),
                    status,
                    e
                );
                None
            }
        }
    }
}
