use serde::{Deserialize, Serialize};

/// Overall tone of a transcript
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Map a classifier label to a sentiment
    ///
    /// Accepts plain labels and the `LABEL_0/1/2` (negative/neutral/positive)
    /// form some sentiment models emit. Unknown labels are neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" | "pos" | "label_2" => Self::Positive,
            "negative" | "neg" | "label_0" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Backend that produced the cleaned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefinementMethod {
    Local,
    Ollama,
    HuggingFace,
    /// A remote mode was requested but failed; local rules were used
    LocalFallback,
}

impl RefinementMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Ollama => "ollama",
            Self::HuggingFace => "hugging_face",
            Self::LocalFallback => "local_fallback",
        }
    }
}

/// Maximum key points kept per refinement
pub const MAX_KEY_POINTS: usize = 3;

/// Cleaned transcript with its analysis; built once per refinement call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementResult {
    pub cleaned_text: String,
    pub sentiment: Sentiment,
    pub summary: String,
    /// At most [`MAX_KEY_POINTS`] entries, in transcript order
    pub key_points: Vec<String>,
}

impl RefinementResult {
    pub fn new(
        cleaned_text: String,
        sentiment: Sentiment,
        summary: String,
        mut key_points: Vec<String>,
    ) -> Self {
        key_points.truncate(MAX_KEY_POINTS);
        Self {
            cleaned_text,
            sentiment,
            summary,
            key_points,
        }
    }

    /// Cleaned text only, with neutral defaults for the analysis fields
    pub fn degraded(cleaned_text: String) -> Self {
        Self::new(cleaned_text, Sentiment::Neutral, String::new(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_labels() {
        assert_eq!(Sentiment::from_label("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("NEGATIVE"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("LABEL_2"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("LABEL_0"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("LABEL_1"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label("mixed"), Sentiment::Neutral);
    }

    #[test]
    fn test_key_points_capped() {
        let points = (0..5).map(|i| format!("point {i}")).collect();
        let result = RefinementResult::new("text".into(), Sentiment::Positive, String::new(), points);
        assert_eq!(result.key_points.len(), MAX_KEY_POINTS);
        assert_eq!(result.key_points[0], "point 0");
    }
}
