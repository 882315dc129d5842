use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Maximum keywords kept per document
pub const MAX_KEYWORDS: usize = 5;

/// Kind of document handed to the analysis aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Transcript,
    Resume,
    JobDescription,
}

impl DocumentKind {
    /// Zero-shot candidate labels for this document kind
    pub fn candidate_labels(&self) -> &'static [&'static str] {
        match self {
            Self::Transcript => &["technical", "behavioral", "experience", "education", "skills"],
            Self::Resume => &["technical_skills", "soft_skills", "languages", "education", "experience"],
            Self::JobDescription => &[
                "technical_requirements",
                "soft_skills",
                "education",
                "experience",
                "responsibilities",
            ],
        }
    }
}

/// Seniority detected from a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    #[default]
    Unknown,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Mid => "mid",
            Self::Senior => "senior",
            Self::Unknown => "unknown",
        }
    }
}

/// Classification and extraction results for one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Every label the classifier returned, with its confidence (0.0-1.0)
    pub label_scores: BTreeMap<String, f64>,
    /// Up to [`MAX_KEYWORDS`] technical keywords
    pub extracted_keywords: BTreeSet<String>,
    pub derived_level: ExperienceLevel,
    /// Abstractive summary; empty when summarization failed or was not run
    #[serde(default)]
    pub summary: String,
}

impl AnalysisRecord {
    /// Labels whose confidence is strictly above `threshold`
    pub fn significant_labels(&self, threshold: f64) -> BTreeMap<String, f64> {
        self.label_scores
            .iter()
            .filter(|(_, score)| **score > threshold)
            .map(|(label, score)| (label.clone(), *score))
            .collect()
    }
}

/// Résumé analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvAnalysis {
    pub record: AnalysisRecord,
}

impl CvAnalysis {
    /// Skill label scores; all classifier labels are kept for matching
    pub fn skills(&self) -> &BTreeMap<String, f64> {
        &self.record.label_scores
    }
}

/// Job description analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub record: AnalysisRecord,
    /// Labels above the significance threshold
    pub requirements: BTreeMap<String, f64>,
}

impl JobAnalysis {
    pub fn from_record(record: AnalysisRecord, threshold: f64) -> Self {
        let requirements = record.significant_labels(threshold);
        Self { record, requirements }
    }
}

/// Interview question classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnalysis {
    /// Top label, or "unknown"
    pub question_type: String,
    pub confidence: f64,
    pub all_scores: BTreeMap<String, f64>,
}

impl Default for QuestionAnalysis {
    fn default() -> Self {
        Self {
            question_type: "unknown".to_string(),
            confidence: 0.0,
            all_scores: BTreeMap::new(),
        }
    }
}
