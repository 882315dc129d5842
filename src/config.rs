use std::str::FromStr;

use crate::error::{RefineError, Result};
use crate::rules::Language;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2:3b";
pub const DEFAULT_HF_ENDPOINT_TEMPLATE: &str =
    "https://router.huggingface.co/hf-inference/models/{model}";
pub const DEFAULT_GENERATION_MODEL: &str = "HuggingFaceH4/zephyr-7b-beta";
pub const DEFAULT_GENERATION_FALLBACKS: &[&str] = &[
    "mistralai/Mistral-7B-Instruct-v0.2",
    "google/flan-t5-large",
    "tiiuae/falcon-7b-instruct",
    "gpt2",
];

/// Which backend produces the cleaned transcript text
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefineMode {
    /// Five-stage rule pipeline, no network access
    Local,
    /// Local Ollama generation endpoint
    Ollama,
    /// HuggingFace inference with the generation fallback chain
    HuggingFace,
}

impl FromStr for RefineMode {
    type Err = RefineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "ollama" => Ok(Self::Ollama),
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            other => Err(RefineError::Configuration(format!(
                "unknown refine mode '{other}' (expected local, ollama or huggingface)"
            ))),
        }
    }
}

/// Process-wide settings, read once and passed into each component
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Ollama server
    pub ollama_host: String,
    /// Model used for Ollama generation
    pub ollama_model: String,
    /// HuggingFace bearer token; gated models need it, public ones do not
    pub hf_api_token: Option<String>,
    /// Inference endpoint template, `{model}` is replaced by the model id
    pub hf_endpoint_template: String,
    /// Primary generation model
    pub generation_model: String,
    /// Generation models tried in order after the primary
    pub generation_fallbacks: Vec<String>,
    /// Timeout for HuggingFace calls in seconds
    pub request_timeout_secs: u64,
    /// Minimum label confidence for a job requirement
    pub significance_threshold: f64,
    /// Output token budget for generation calls
    pub max_output_tokens: u32,
    /// Transcript language code (e.g. "ar", "en")
    pub language: String,
    /// Backend used for the cleaned transcript
    pub refine_mode: RefineMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            hf_api_token: None,
            hf_endpoint_template: DEFAULT_HF_ENDPOINT_TEMPLATE.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            generation_fallbacks: DEFAULT_GENERATION_FALLBACKS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            request_timeout_secs: 60,
            significance_threshold: 0.3,
            max_output_tokens: 512,
            language: "ar".to_string(),
            refine_mode: RefineMode::Local,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read settings from the environment
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Failed to load .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let generation_fallbacks = match get("HF_GENERATION_FALLBACKS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.generation_fallbacks,
        };

        let hf_endpoint_template =
            get("HF_INFERENCE_ENDPOINT").unwrap_or(defaults.hf_endpoint_template);
        if !hf_endpoint_template.contains("{model}") {
            return Err(RefineError::Configuration(format!(
                "HF_INFERENCE_ENDPOINT must contain a {{model}} placeholder: {hf_endpoint_template}"
            )));
        }

        let significance_threshold =
            parse_or(get("REQUIREMENT_THRESHOLD"), "REQUIREMENT_THRESHOLD", defaults.significance_threshold)?;
        if !(0.0..=1.0).contains(&significance_threshold) {
            return Err(RefineError::Configuration(format!(
                "REQUIREMENT_THRESHOLD must be within 0.0..=1.0, got {significance_threshold}"
            )));
        }

        Ok(Self {
            ollama_host: get("OLLAMA_HOST")
                .map(|h| h.trim_end_matches('/').to_string())
                .unwrap_or(defaults.ollama_host),
            ollama_model: get("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            hf_api_token: get("HUGGINGFACE_API_TOKEN").or_else(|| get("HUGGINGFACE_API_KEY")),
            hf_endpoint_template,
            generation_model: get("HF_GENERATION_MODEL").unwrap_or(defaults.generation_model),
            generation_fallbacks,
            request_timeout_secs: parse_or(
                get("REQUEST_TIMEOUT_SECS"),
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            significance_threshold,
            max_output_tokens: parse_or(
                get("MAX_OUTPUT_TOKENS"),
                "MAX_OUTPUT_TOKENS",
                defaults.max_output_tokens,
            )?,
            language: get("TRANSCRIBE_LANGUAGE").unwrap_or(defaults.language),
            refine_mode: match get("REFINE_MODE") {
                Some(mode) => mode.parse()?,
                None => defaults.refine_mode,
            },
        })
    }

    /// All generation candidates, primary first
    pub fn generation_candidates(&self) -> Vec<String> {
        std::iter::once(self.generation_model.clone())
            .chain(self.generation_fallbacks.iter().cloned())
            .collect()
    }

    pub fn language(&self) -> Language {
        Language::from_code(&self.language)
    }

    /// Ollama generate endpoint
    pub fn ollama_endpoint(&self) -> String {
        format!("{}/api/generate", self.ollama_host.trim_end_matches('/'))
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| {
            RefineError::Configuration(format!("{key} has an invalid value: {raw}"))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.ollama_model, "llama3.2:3b");
        assert_eq!(config.significance_threshold, 0.3);
        assert_eq!(config.refine_mode, RefineMode::Local);
        assert!(config.hf_api_token.is_none());
        assert_eq!(config.generation_candidates().len(), 5);
        assert_eq!(config.ollama_endpoint(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = AppConfig::from_lookup(lookup(&[
            ("OLLAMA_HOST", "http://gpu-box:11434/"),
            ("HUGGINGFACE_API_KEY", "hf_secret"),
            ("HF_GENERATION_MODEL", "model-a"),
            ("HF_GENERATION_FALLBACKS", "model-b, ,model-c"),
            ("REFINE_MODE", "hf"),
            ("TRANSCRIBE_LANGUAGE", "en"),
        ]))
        .unwrap();

        assert_eq!(config.ollama_endpoint(), "http://gpu-box:11434/api/generate");
        assert_eq!(config.hf_api_token.as_deref(), Some("hf_secret"));
        assert_eq!(config.generation_candidates(), vec!["model-a", "model-b", "model-c"]);
        assert_eq!(config.refine_mode, RefineMode::HuggingFace);
        assert_eq!(config.language(), Language::English);
    }

    #[test]
    fn test_invalid_values_are_configuration_errors() {
        let err = AppConfig::from_lookup(lookup(&[("MAX_OUTPUT_TOKENS", "lots")])).unwrap_err();
        assert!(matches!(err, RefineError::Configuration(_)));

        let err = AppConfig::from_lookup(lookup(&[("REFINE_MODE", "magic")])).unwrap_err();
        assert!(matches!(err, RefineError::Configuration(_)));

        let err =
            AppConfig::from_lookup(lookup(&[("HF_INFERENCE_ENDPOINT", "http://x/models")])).unwrap_err();
        assert!(matches!(err, RefineError::Configuration(_)));

        let err = AppConfig::from_lookup(lookup(&[("REQUIREMENT_THRESHOLD", "1.5")])).unwrap_err();
        assert!(matches!(err, RefineError::Configuration(_)));
    }
}
