use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{RefineError, Result};
use crate::models::{Transcript, TranscriptionOutput};

/// Speech-to-text collaborator: turns an audio file into a raw transcript
pub trait Transcriber {
    fn name(&self) -> &str;

    /// Transcribe `audio`, optionally forcing a language code
    fn transcribe(&self, audio: &Path, language: Option<&str>) -> Result<Transcript>;
}

/// Reads the JSON an external speech-to-text run left next to the audio file
///
/// For `interview.wav` the transcript is expected at
/// `interview.wav.transcript.json`, in the [`TranscriptionOutput`] shape.
#[derive(Debug, Clone, Default)]
pub struct SidecarTranscriber;

impl SidecarTranscriber {
    pub fn sidecar_path(audio: &Path) -> PathBuf {
        let mut name = audio.as_os_str().to_os_string();
        name.push(".transcript.json");
        PathBuf::from(name)
    }
}

impl Transcriber for SidecarTranscriber {
    fn name(&self) -> &str {
        "sidecar"
    }

    fn transcribe(&self, audio: &Path, language: Option<&str>) -> Result<Transcript> {
        if !audio.exists() {
            return Err(RefineError::TranscriptNotFound(audio.display().to_string()));
        }

        let sidecar = Self::sidecar_path(audio);
        let content = std::fs::read_to_string(&sidecar).map_err(|e| {
            RefineError::UnavailableBackend(format!(
                "no transcript at {} ({e}); run speech-to-text first",
                sidecar.display()
            ))
        })?;

        let output: TranscriptionOutput = serde_json::from_str(&content)
            .map_err(|e| RefineError::parse(self.name(), e.to_string()))?;
        info!(
            "Loaded transcript for {:?}: {} segments, model {}",
            audio,
            output.segments.len(),
            output.metadata.model_id.as_deref().unwrap_or("unknown")
        );

        let mut transcript = Transcript::from(output);
        if transcript.detected_language.is_none() {
            transcript.detected_language = language.map(str::to_string);
        }
        Ok(transcript)
    }
}
