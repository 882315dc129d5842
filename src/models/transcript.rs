use serde::{Deserialize, Serialize};

/// A timestamped piece of the transcript, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Metadata reported by the speech-to-text backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptionMetadata {
    #[serde(default)]
    pub language: Option<String>,
    /// Backend and model, e.g. "faster-whisper:medium"
    #[serde(default, alias = "model")]
    pub model_id: Option<String>,
    /// Seconds spent transcribing
    #[serde(default)]
    pub processing_time: Option<f64>,
}

/// Wire shape produced by the transcription collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionOutput {
    pub raw_transcript: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub metadata: TranscriptionMetadata,
}

/// Raw speech-to-text result; never modified once produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub raw_text: String,
    /// Ordered by start time
    pub segments: Vec<Segment>,
    pub detected_language: Option<String>,
}

impl Transcript {
    /// A transcript with no timing information
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            raw_text: text.into(),
            segments: Vec::new(),
            detected_language: None,
        }
    }

    /// End of the last segment in seconds
    pub fn duration(&self) -> f64 {
        self.segments.last().map(|s| s.end).unwrap_or(0.0)
    }
}

impl From<TranscriptionOutput> for Transcript {
    fn from(output: TranscriptionOutput) -> Self {
        Self {
            raw_text: output.raw_transcript,
            segments: output.segments,
            detected_language: output.metadata.language,
        }
    }
}
