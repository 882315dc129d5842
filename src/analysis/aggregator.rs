use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{RefineError, Result};
use crate::llm::{HuggingFaceClient, ProviderAdapter};
use crate::models::{
    CvAnalysis, DocumentKind, JobAnalysis, ProviderConfig, QuestionAnalysis, RefinementResult,
    Sentiment,
};

use super::{extract_key_points, local_record};

/// Length bounds for an abstractive summary
#[derive(Debug, Clone, Copy)]
pub struct SummaryBounds {
    pub max_length: u32,
    pub min_length: u32,
}

pub const TRANSCRIPT_SUMMARY: SummaryBounds = SummaryBounds {
    max_length: 200,
    min_length: 50,
};
pub const RESUME_SUMMARY: SummaryBounds = SummaryBounds {
    max_length: 150,
    min_length: 50,
};

/// Models used for each analysis task
#[derive(Debug, Clone)]
pub struct AnalysisModels {
    pub classification: String,
    pub sentiment: String,
    pub summarization: String,
}

impl Default for AnalysisModels {
    fn default() -> Self {
        Self {
            classification: "facebook/bart-large-mnli".to_string(),
            sentiment: "cardiffnlp/twitter-roberta-base-sentiment-latest".to_string(),
            summarization: "facebook/bart-large-cnn".to_string(),
        }
    }
}

/// Runs classification, summarization and sentiment calls per document
///
/// Sub-calls are issued one at a time. A failed sub-call leaves its field at
/// the default; no sub-call failure turns into an overall failure.
pub struct AnalysisAggregator {
    adapter: Arc<dyn ProviderAdapter>,
    endpoint_template: String,
    models: AnalysisModels,
    threshold: f64,
}

impl AnalysisAggregator {
    pub fn new(adapter: Arc<dyn ProviderAdapter>, endpoint_template: &str, threshold: f64) -> Self {
        Self {
            adapter,
            endpoint_template: endpoint_template.to_string(),
            models: AnalysisModels::default(),
            threshold,
        }
    }

    /// Build a HuggingFace-backed aggregator; fails without an API token
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let token = config.hf_api_token.clone().ok_or_else(|| {
            RefineError::Configuration("HUGGINGFACE_API_TOKEN not found in environment".to_string())
        })?;
        let client = HuggingFaceClient::new(
            Some(token),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::new(
            Arc::new(client),
            &config.hf_endpoint_template,
            config.significance_threshold,
        ))
    }

    async fn call(&self, model: &str, payload: Value) -> Option<Value> {
        let config = ProviderConfig::from_template(&self.endpoint_template, model, true);
        self.adapter.call(&config, &payload).await
    }

    /// Zero-shot classification over `labels`; `None` if the call failed
    async fn classify(&self, text: &str, labels: &[&str]) -> Option<BTreeMap<String, f64>> {
        let payload = json!({
            "inputs": text,
            "parameters": { "candidate_labels": labels },
        });
        let response = self.call(&self.models.classification, payload).await?;
        match serde_json::from_value::<ClassificationResponse>(response) {
            Ok(parsed) => Some(parsed.labels.into_iter().zip(parsed.scores).collect()),
            Err(e) => {
                warn!("Unexpected classification response: {}", e);
                None
            }
        }
    }

    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Option<String> {
        let payload = json!({
            "inputs": text,
            "parameters": { "max_length": bounds.max_length, "min_length": bounds.min_length },
        });
        let response = self.call(&self.models.summarization, payload).await?;
        response
            .get(0)?
            .get("summary_text")?
            .as_str()
            .map(|s| s.trim().to_string())
    }

    async fn sentiment(&self, text: &str) -> Option<Sentiment> {
        let response = self.call(&self.models.sentiment, json!({ "inputs": text })).await?;
        // Either [[{label, score}, ...]] or a flat [{label, score}, ...]
        let scores = match response {
            Value::Array(mut items) if matches!(items.first(), Some(Value::Array(_))) => {
                items.swap_remove(0)
            }
            other => other,
        };
        let scores: Vec<LabelScore> = serde_json::from_value(scores).ok()?;
        scores
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|top| Sentiment::from_label(&top.label))
    }

    /// Skill labels (all of them), summary, keywords and level for a résumé
    pub async fn analyze_cv(&self, text: &str) -> CvAnalysis {
        let mut record = local_record(text);

        match self.classify(text, DocumentKind::Resume.candidate_labels()).await {
            Some(skills) => record.label_scores = skills,
            None => warn!("Résumé skill classification unavailable"),
        }
        if let Some(summary) = self.summarize(text, RESUME_SUMMARY).await {
            record.summary = summary;
        }

        info!("Résumé analysis: {} skill labels", record.label_scores.len());
        CvAnalysis { record }
    }

    /// Requirement labels above the significance threshold, keywords and level
    pub async fn analyze_job(&self, text: &str) -> JobAnalysis {
        let mut record = local_record(text);

        match self.classify(text, DocumentKind::JobDescription.candidate_labels()).await {
            Some(labels) => record.label_scores = labels,
            None => warn!("Job requirement classification unavailable"),
        }

        let job = JobAnalysis::from_record(record, self.threshold);
        info!(
            "Job analysis: {} of {} labels above {}",
            job.requirements.len(),
            job.record.label_scores.len(),
            self.threshold
        );
        job
    }

    /// Classify an interview question
    pub async fn analyze_question(&self, question: &str) -> QuestionAnalysis {
        let Some(scores) = self.classify(question, DocumentKind::Transcript.candidate_labels()).await
        else {
            return QuestionAnalysis::default();
        };

        match scores.iter().max_by(|a, b| a.1.total_cmp(b.1)) {
            Some((label, score)) => QuestionAnalysis {
                question_type: label.clone(),
                confidence: *score,
                all_scores: scores.clone(),
            },
            None => QuestionAnalysis::default(),
        }
    }

    /// Sentiment, summary and key points for an already cleaned transcript
    pub async fn analyze_transcript(&self, cleaned_text: &str) -> RefinementResult {
        let sentiment = self.sentiment(cleaned_text).await.unwrap_or_default();
        let summary = self
            .summarize(cleaned_text, TRANSCRIPT_SUMMARY)
            .await
            .unwrap_or_default();

        RefinementResult::new(
            cleaned_text.to_string(),
            sentiment,
            summary,
            extract_key_points(cleaned_text),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ClassificationResponse {
    labels: Vec<String>,
    scores: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::testing::MockProvider;
    use crate::models::ExperienceLevel;

    const TEMPLATE: &str = "http://hf.test/models/{model}";

    fn aggregator(mock: MockProvider) -> (AnalysisAggregator, Arc<MockProvider>) {
        let mock = Arc::new(mock);
        (AnalysisAggregator::new(mock.clone(), TEMPLATE, 0.3), mock)
    }

    #[tokio::test]
    async fn test_analyze_cv_merges_remote_and_local_fields() {
        let mock = MockProvider::new()
            .respond(
                "facebook/bart-large-mnli",
                true,
                json!({"labels": ["technical_skills", "soft_skills"], "scores": [0.9, 0.05]}),
            )
            .respond("facebook/bart-large-cnn", true, json!([{"summary_text": " Senior Python dev. "}]));
        let (aggregator, _) = aggregator(mock);

        let cv = aggregator.analyze_cv("Senior engineer, 7+ years of Python and Docker").await;
        assert_eq!(cv.skills().len(), 2);
        assert_eq!(cv.skills()["soft_skills"], 0.05);
        assert_eq!(cv.record.summary, "Senior Python dev.");
        assert_eq!(cv.record.derived_level, ExperienceLevel::Senior);
        assert!(cv.record.extracted_keywords.contains("python"));
        assert!(cv.record.extracted_keywords.contains("docker"));
    }

    #[tokio::test]
    async fn test_analyze_job_filters_requirements() {
        let mock = MockProvider::new().respond(
            "facebook/bart-large-mnli",
            true,
            json!({
                "labels": ["technical_requirements", "soft_skills", "education"],
                "scores": [0.8, 0.4, 0.1]
            }),
        );
        let (aggregator, mock) = aggregator(mock);

        let job = aggregator.analyze_job("Mid-level backend role, 3-5 years").await;
        assert_eq!(job.requirements.len(), 2);
        assert!(!job.requirements.contains_key("education"));
        assert_eq!(job.record.label_scores.len(), 3);
        assert_eq!(job.record.derived_level, ExperienceLevel::Mid);

        let payload = &mock.payloads()[0];
        assert_eq!(payload["parameters"]["candidate_labels"][4], "responsibilities");
    }

    #[tokio::test]
    async fn test_sub_call_failures_degrade() {
        let (aggregator, mock) = aggregator(MockProvider::new());

        let cv = aggregator.analyze_cv("Junior developer").await;
        assert!(cv.skills().is_empty());
        assert!(cv.record.summary.is_empty());
        assert_eq!(cv.record.derived_level, ExperienceLevel::Junior);

        let job = aggregator.analyze_job("anything").await;
        assert!(job.requirements.is_empty());

        let text = "We shipped the new onboarding flow in two weeks. It worked.";
        let result = aggregator.analyze_transcript(text).await;
        assert_eq!(result.cleaned_text, text);
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert!(result.summary.is_empty());
        assert_eq!(result.key_points, vec!["We shipped the new onboarding flow in two weeks"]);

        assert_eq!(aggregator.analyze_question("Why Rust?").await, QuestionAnalysis::default());
        assert!(mock.calls().iter().all(|(_, auth)| *auth));
    }

    #[tokio::test]
    async fn test_transcript_sentiment_picks_top_label() {
        let mock = MockProvider::new()
            .respond(
                "cardiffnlp/twitter-roberta-base-sentiment-latest",
                true,
                json!([[{"label": "neutral", "score": 0.2}, {"label": "negative", "score": 0.7}]]),
            )
            .respond("facebook/bart-large-cnn", true, json!([{"summary_text": "A rough interview."}]));
        let (aggregator, _) = aggregator(mock);

        let result = aggregator.analyze_transcript("It did not go well at all.").await;
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.summary, "A rough interview.");
    }

    #[tokio::test]
    async fn test_malformed_classification_is_ignored() {
        let mock = MockProvider::new().respond("facebook/bart-large-mnli", true, json!({"error": "loading"}));
        let (aggregator, _) = aggregator(mock);
        let cv = aggregator.analyze_cv("text").await;
        assert!(cv.skills().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_question() {
        let mock = MockProvider::new().respond(
            "facebook/bart-large-mnli",
            true,
            json!({"labels": ["behavioral", "technical"], "scores": [0.7, 0.2]}),
        );
        let (aggregator, _) = aggregator(mock);

        let analysis = aggregator.analyze_question("Tell me about a conflict you resolved").await;
        assert_eq!(analysis.question_type, "behavioral");
        assert_eq!(analysis.confidence, 0.7);
        assert_eq!(analysis.all_scores.len(), 2);
    }

    #[test]
    fn test_from_config_requires_token() {
        let err = AnalysisAggregator::from_config(&AppConfig::default()).err().unwrap();
        assert!(matches!(err, RefineError::Configuration(_)));

        let config = AppConfig {
            hf_api_token: Some("hf_token".to_string()),
            ..Default::default()
        };
        assert!(AnalysisAggregator::from_config(&config).is_ok());
    }
}
