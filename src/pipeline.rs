use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{
    AnalysisAggregator, compatibility_score, extract_key_points, local_record, recommendations,
};
use crate::config::{AppConfig, RefineMode};
use crate::error::Result;
use crate::io::ProcessingReport;
use crate::llm::{
    GenerationFallbackChain, HuggingFaceClient, OllamaClient, OllamaConfig, ProviderAdapter,
    refinement_prompt,
};
use crate::models::{
    CvAnalysis, JobAnalysis, QuestionAnalysis, RefinementMethod, RefinementResult, Sentiment,
    Transcript,
};
use crate::stages::{LocalPipeline, normalize};

/// End-to-end orchestration: clean the transcript, analyze it together with
/// the optional résumé and job description, and score the match
///
/// Every remote step is best-effort. Whatever fails, `process` still returns
/// a report built from the local pipeline and local extraction.
pub struct Refiner {
    config: AppConfig,
    local: LocalPipeline,
    generation: Option<Arc<dyn ProviderAdapter>>,
    ollama: Option<OllamaClient>,
    aggregator: Option<AnalysisAggregator>,
}

impl Refiner {
    /// Build the backends the configured mode needs
    pub fn new(config: AppConfig) -> Result<Self> {
        let generation: Option<Arc<dyn ProviderAdapter>> = match config.refine_mode {
            RefineMode::HuggingFace => {
                let client = HuggingFaceClient::new(
                    config.hf_api_token.clone(),
                    Duration::from_secs(config.request_timeout_secs),
                )?;
                if !client.has_token() {
                    warn!("No HuggingFace token configured, generation will only try anonymous calls");
                }
                Some(Arc::new(client))
            }
            _ => None,
        };

        let ollama = match config.refine_mode {
            RefineMode::Ollama => Some(OllamaClient::new(OllamaConfig::from_app(&config))?),
            _ => None,
        };

        let aggregator = match AnalysisAggregator::from_config(&config) {
            Ok(aggregator) => Some(aggregator),
            Err(e) => {
                warn!("Remote analysis disabled, using local extraction only: {}", e);
                None
            }
        };

        Ok(Self {
            local: LocalPipeline::new(config.language()),
            config,
            generation,
            ollama,
            aggregator,
        })
    }

    /// Use `adapter` for the HuggingFace generation chain
    pub fn with_generation_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.generation = Some(adapter);
        self
    }

    pub fn with_aggregator(mut self, aggregator: AnalysisAggregator) -> Self {
        self.aggregator = Some(aggregator);
        self
    }

    /// Produce the cleaned text with the configured backend
    ///
    /// A remote backend that fails or returns nothing is replaced by the
    /// local pipeline, reported as [`RefinementMethod::LocalFallback`].
    pub async fn refine_text(&self, text: &str) -> (String, RefinementMethod) {
        if text.trim().is_empty() {
            return (text.to_string(), RefinementMethod::Local);
        }

        match self.config.refine_mode {
            RefineMode::Local => (self.local.refine(text), RefinementMethod::Local),
            RefineMode::Ollama => {
                let Some(client) = &self.ollama else {
                    warn!("Ollama mode selected but no client configured");
                    return self.local_fallback(text);
                };
                match client.refine(text, self.local.language()).await {
                    Ok(refined) => {
                        info!("Refined transcript with Ollama model {}", client.model());
                        (refined, RefinementMethod::Ollama)
                    }
                    Err(e) => {
                        warn!("Ollama refinement failed: {}", e);
                        self.local_fallback(text)
                    }
                }
            }
            RefineMode::HuggingFace => {
                let Some(adapter) = &self.generation else {
                    warn!("HuggingFace mode selected but no adapter configured");
                    return self.local_fallback(text);
                };
                let prompt = refinement_prompt(&normalize(text), self.local.language());
                let mut chain = GenerationFallbackChain::from_config(adapter.as_ref(), &self.config);
                let refined = chain.generate(&prompt).await;
                if refined.is_empty() {
                    return self.local_fallback(text);
                }
                info!(
                    "Refined transcript with {}",
                    chain.winning_model().unwrap_or("unknown model")
                );
                (refined, RefinementMethod::HuggingFace)
            }
        }
    }

    fn local_fallback(&self, text: &str) -> (String, RefinementMethod) {
        info!("Falling back to local rule pipeline");
        (self.local.refine(text), RefinementMethod::LocalFallback)
    }

    /// Sentiment, summary and key points for the cleaned text
    async fn analyze_transcript(&self, cleaned: &str, method: RefinementMethod) -> RefinementResult {
        if let (RefinementMethod::Ollama, Some(client)) = (method, &self.ollama) {
            match client.extract_insights(cleaned).await {
                Ok(insights) => return insights.into_refinement(cleaned.to_string()),
                Err(e) => warn!("Ollama insight extraction failed: {}", e),
            }
        }

        match &self.aggregator {
            Some(aggregator) => aggregator.analyze_transcript(cleaned).await,
            None => RefinementResult::new(
                cleaned.to_string(),
                Sentiment::Neutral,
                String::new(),
                extract_key_points(cleaned),
            ),
        }
    }

    async fn analyze_cv(&self, text: &str) -> CvAnalysis {
        match &self.aggregator {
            Some(aggregator) => aggregator.analyze_cv(text).await,
            None => CvAnalysis {
                record: local_record(text),
            },
        }
    }

    async fn analyze_job(&self, text: &str) -> JobAnalysis {
        match &self.aggregator {
            Some(aggregator) => aggregator.analyze_job(text).await,
            None => JobAnalysis::from_record(local_record(text), self.config.significance_threshold),
        }
    }

    /// Classify an interview question; "unknown" without a remote classifier
    pub async fn classify_question(&self, question: &str) -> QuestionAnalysis {
        match &self.aggregator {
            Some(aggregator) => aggregator.analyze_question(question).await,
            None => QuestionAnalysis::default(),
        }
    }

    /// Run the whole flow for one transcript
    pub async fn process(
        &self,
        transcript: &Transcript,
        cv_text: Option<&str>,
        job_text: Option<&str>,
    ) -> ProcessingReport {
        let start = Instant::now();

        let (cleaned, method) = self.refine_text(&transcript.raw_text).await;
        info!("Cleaned transcript via {}: {} chars", method.as_str(), cleaned.len());

        let refinement = self.analyze_transcript(&cleaned, method).await;

        let cv_analysis = match cv_text {
            Some(text) => Some(self.analyze_cv(text).await),
            None => None,
        };
        let job_analysis = match job_text {
            Some(text) => Some(self.analyze_job(text).await),
            None => None,
        };

        let compatibility = match (&cv_analysis, &job_analysis) {
            (Some(cv), Some(job)) => {
                let score = compatibility_score(cv, job);
                info!("Compatibility score: {:.2}", score);
                Some(score)
            }
            _ => None,
        };
        let advice = recommendations(&refinement, cv_analysis.as_ref(), job_analysis.as_ref());

        ProcessingReport {
            id: Uuid::new_v4(),
            processed_at: Utc::now(),
            language: self.local.language().code().to_string(),
            detected_language: transcript.detected_language.clone(),
            refinement_method: method,
            raw_transcript: transcript.raw_text.clone(),
            segments: transcript.segments.clone(),
            refinement,
            cv_analysis,
            job_analysis,
            compatibility_score: compatibility,
            recommendations: advice,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
