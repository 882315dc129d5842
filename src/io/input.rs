use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Transcript, TranscriptionOutput};

/// Load a transcript from a transcription JSON file or a plain text file
///
/// Files ending in `.json` must hold the speech-to-text output shape; any
/// other file is taken verbatim as the raw transcript.
pub fn load_transcript(path: &Path) -> Result<Transcript> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_transcription_json(&content)
    } else {
        Ok(Transcript::from_text(content))
    }
}

/// Parse speech-to-text output JSON into a Transcript
pub fn parse_transcription_json(json: &str) -> Result<Transcript> {
    let output: TranscriptionOutput =
        serde_json::from_str(json).context("Failed to parse transcription JSON")?;
    Ok(output.into())
}

/// Read a résumé or job description as plain text
pub fn load_document(path: &Path) -> Result<String> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    anyhow::ensure!(!text.trim().is_empty(), "Document is empty: {:?}", path);
    Ok(text)
}
