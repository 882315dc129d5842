use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::models::ProviderConfig;

use super::{ProviderAdapter, strip_instruction_echo, wrap_instruction};

/// Progress of a fallback chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    NotStarted,
    /// Working on the candidate at this index
    Trying(usize),
    Succeeded,
    Exhausted,
}

/// One call to make: which candidate, which try (1 = with token, 2 = without)
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub candidate: usize,
    pub attempt_number: u8,
    pub config: ProviderConfig,
}

/// Yields attempts in order: every candidate with auth, then without
///
/// Retry policy lives here; the caller only decides whether an attempt
/// succeeded, and may skip the rest of a candidate's attempts.
pub struct FallbackAttempts<'a> {
    candidates: &'a [String],
    endpoint_template: &'a str,
    candidate: usize,
    next_attempt: u8,
}

impl<'a> FallbackAttempts<'a> {
    pub fn new(candidates: &'a [String], endpoint_template: &'a str) -> Self {
        Self {
            candidates,
            endpoint_template,
            candidate: 0,
            next_attempt: 1,
        }
    }

    /// Move on to the next candidate without its remaining attempts
    pub fn skip_candidate(&mut self) {
        if self.next_attempt > 1 {
            self.candidate += 1;
            self.next_attempt = 1;
        }
    }
}

impl Iterator for FallbackAttempts<'_> {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        let model = self.candidates.get(self.candidate)?;
        let attempt = Attempt {
            candidate: self.candidate,
            attempt_number: self.next_attempt,
            config: ProviderConfig::from_template(self.endpoint_template, model, self.next_attempt == 1),
        };

        if self.next_attempt == 1 {
            self.next_attempt = 2;
        } else {
            self.candidate += 1;
            self.next_attempt = 1;
        }
        Some(attempt)
    }
}

/// Sampling parameters sent with every generation request
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub do_sample: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 512,
            temperature: 0.3,
            top_p: 0.9,
            do_sample: true,
        }
    }
}

/// Tries generation models in order until one produces non-empty text
///
/// Each candidate is called with the token first and, if that call fails or
/// returns an empty body (`[]`, `{}`, `null`), once more without it. A body
/// with content but only whitespace text (after stripping any echoed
/// instruction) moves straight on to the next candidate. The first non-empty result wins; later candidates are never
/// called. When every candidate fails the chain returns "".
pub struct GenerationFallbackChain<'a> {
    adapter: &'a dyn ProviderAdapter,
    candidates: Vec<String>,
    endpoint_template: String,
    params: GenerationParams,
    state: ChainState,
    winner: Option<String>,
}

impl<'a> GenerationFallbackChain<'a> {
    pub fn new(adapter: &'a dyn ProviderAdapter, candidates: Vec<String>, endpoint_template: &str) -> Self {
        Self {
            adapter,
            candidates,
            endpoint_template: endpoint_template.to_string(),
            params: GenerationParams::default(),
            state: ChainState::NotStarted,
            winner: None,
        }
    }

    /// Chain over the configured primary and fallback models
    pub fn from_config(adapter: &'a dyn ProviderAdapter, config: &AppConfig) -> Self {
        Self::new(adapter, config.generation_candidates(), &config.hf_endpoint_template).with_params(
            GenerationParams {
                max_new_tokens: config.max_output_tokens,
                ..Default::default()
            },
        )
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Model that produced the last successful generation
    pub fn winning_model(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Run the chain for `prompt`; "" means no candidate produced text
    pub async fn generate(&mut self, prompt: &str) -> String {
        self.state = ChainState::NotStarted;
        self.winner = None;

        let payload = json!({
            "inputs": wrap_instruction(prompt),
            "parameters": self.params,
        });

        let mut attempts = FallbackAttempts::new(&self.candidates, &self.endpoint_template);
        while let Some(attempt) = attempts.next() {
            let model = &attempt.config.model_id;
            self.state = ChainState::Trying(attempt.candidate);

            if attempt.attempt_number == 1 {
                info!("Trying generation with model: {}", model);
            } else {
                info!("Retrying {} without token", model);
            }

            let response = self.adapter.call(&attempt.config, &payload).await;
            let Some(response) = response.filter(|body| !is_empty_body(body)) else {
                if attempt.attempt_number > 1 {
                    warn!("Model {} failed with and without token, trying next", model);
                }
                continue;
            };

            let generated = extract_generated_text(&response)
                .map(strip_instruction_echo)
                .unwrap_or_default();
            if !generated.is_empty() {
                info!("Generation succeeded with model: {}", model);
                self.state = ChainState::Succeeded;
                self.winner = Some(model.clone());
                return generated.to_string();
            }

            warn!("Model {} returned empty output, trying next", model);
            attempts.skip_candidate();
        }

        warn!(
            "All {} generation candidates failed via {}",
            self.candidates.len(),
            self.adapter.name()
        );
        self.state = ChainState::Exhausted;
        String::new()
    }
}

fn is_empty_body(response: &Value) -> bool {
    match response {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Pull `generated_text` out of `[{generated_text}]` or `{generated_text}`
fn extract_generated_text(response: &Value) -> Option<&str> {
    let item = match response {
        Value::Array(items) => items.first()?,
        other => other,
    };
    item.get("generated_text")?.as_str()
}
