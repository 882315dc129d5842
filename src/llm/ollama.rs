use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::config::AppConfig;
use crate::error::{RefineError, Result};
use crate::models::{ProviderConfig, RefinementResult, Sentiment};
use crate::rules::Language;
use crate::stages::normalize;

use super::{ProviderAdapter, insights_prompt, refinement_prompt};

/// Fixed bound on every Ollama request
pub const OLLAMA_TIMEOUT: Duration = Duration::from_secs(30);

/// Shape of the generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

/// Configuration for the Ollama client
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Full generate endpoint, e.g. http://localhost:11434/api/generate
    pub endpoint: String,
    pub model: String,
    /// Temperature for refinement (structured extraction always uses 0)
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl OllamaConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            endpoint: config.ollama_endpoint(),
            model: config.ollama_model.clone(),
            temperature: 0.2,
            max_tokens: config.max_output_tokens,
        }
    }
}

/// Summary, key points and sentiment extracted as JSON
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TranscriptInsights {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub sentiment: String,
}

impl TranscriptInsights {
    pub fn into_refinement(self, cleaned_text: String) -> RefinementResult {
        RefinementResult::new(
            cleaned_text,
            Sentiment::from_label(&self.sentiment),
            self.summary,
            self.key_points,
        )
    }
}

/// Client for a local Ollama generation server
pub struct OllamaClient {
    client: Client,
    config: OllamaConfig,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(OLLAMA_TIMEOUT)
            .build()
            .map_err(|e| RefineError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            model_id: self.config.model.clone(),
            endpoint: self.config.endpoint.clone(),
            use_auth: false,
        }
    }

    /// Generate text for `prompt`; the prompt is whitespace-normalized first
    pub async fn generate(
        &self,
        prompt: &str,
        temperature: f64,
        max_tokens: u32,
        format: ResponseFormat,
    ) -> Result<String> {
        let request = OllamaRequest {
            model: &self.config.model,
            prompt: normalize(prompt),
            format: match format {
                ResponseFormat::Text => None,
                ResponseFormat::Json => Some("json"),
            },
            options: OllamaOptions {
                temperature,
                num_predict: max_tokens,
            },
            stream: false,
        };
        let payload = serde_json::to_value(&request)
            .map_err(|e| RefineError::parse(&self.config.model, e.to_string()))?;

        let body = self
            .call(&self.provider_config(), &payload)
            .await
            .ok_or_else(|| RefineError::transport(&self.config.model, "no response from Ollama"))?;

        let response: OllamaResponse = serde_json::from_value(body)
            .map_err(|e| RefineError::parse(&self.config.model, e.to_string()))?;
        Ok(response.response.trim().to_string())
    }

    /// Clean up a transcript with the language-specific instruction prompt
    ///
    /// An empty generation is reported as a transport failure so callers can
    /// fall back.
    pub async fn refine(&self, text: &str, language: Language) -> Result<String> {
        let prompt = refinement_prompt(&normalize(text), language);
        let refined = self
            .generate(&prompt, self.config.temperature, self.config.max_tokens, ResponseFormat::Text)
            .await?;
        if refined.is_empty() {
            return Err(RefineError::transport(&self.config.model, "empty refinement"));
        }
        Ok(refined)
    }

    /// Generate a JSON value; a body that is not valid JSON is a parse error
    pub async fn generate_json(&self, prompt: &str) -> Result<Value> {
        let raw = self
            .generate(prompt, 0.0, self.config.max_tokens, ResponseFormat::Json)
            .await?;
        serde_json::from_str(&raw).map_err(|e| {
            error!("Failed to parse JSON from Ollama: {}", e);
            RefineError::parse(&self.config.model, e.to_string())
        })
    }

    /// Extract summary, key points and sentiment for a cleaned transcript
    pub async fn extract_insights(&self, text: &str) -> Result<TranscriptInsights> {
        let value = self.generate_json(&insights_prompt(text)).await?;
        serde_json::from_value(value).map_err(|e| RefineError::parse(&self.config.model, e.to_string()))
    }
}

#[async_trait]
impl ProviderAdapter for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn call(&self, config: &ProviderConfig, payload: &Value) -> Option<Value> {
        let response = match self.client.post(&config.endpoint).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Ollama request failed for {}: {}", config.model_id, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Ollama error for {}: {} - {}", config.model_id, status, body);
            return None;
        }

        match response.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("Ollama response for {} is not valid JSON: {}", config.model_id, e);
                None
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    options: OllamaOptions,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f64,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}
