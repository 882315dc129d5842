use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CvAnalysis, JobAnalysis, RefinementMethod, RefinementResult, Segment};

/// Machine-readable result of one processing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub id: Uuid,
    pub processed_at: DateTime<Utc>,
    /// Language code the rules and prompts were chosen for
    pub language: String,
    /// Language reported by the transcriber, when it reported one
    #[serde(default)]
    pub detected_language: Option<String>,
    pub refinement_method: RefinementMethod,
    pub raw_transcript: String,
    pub segments: Vec<Segment>,
    pub refinement: RefinementResult,
    pub cv_analysis: Option<CvAnalysis>,
    pub job_analysis: Option<JobAnalysis>,
    /// Present only when both a résumé and a job description were analyzed
    pub compatibility_score: Option<f64>,
    pub recommendations: Vec<String>,
    pub processing_time_ms: u64,
}

impl ProcessingReport {
    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable report format
pub struct HumanReport<'a> {
    report: &'a ProcessingReport,
}

impl<'a> HumanReport<'a> {
    pub fn new(report: &'a ProcessingReport) -> Self {
        Self { report }
    }

    /// Format the report as plain text
    pub fn format(&self) -> String {
        let report = self.report;
        let refinement = &report.refinement;
        let mut output = String::new();

        output.push_str(&format!("Interview transcript {}\n", report.id));
        let language = match &report.detected_language {
            Some(detected) if *detected != report.language => {
                format!("{} (detected: {})", report.language, detected)
            }
            _ => report.language.clone(),
        };
        output.push_str(&format!(
            "Processed {} | language: {} | method: {} | sentiment: {}\n\n",
            report.processed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            language,
            report.refinement_method.as_str(),
            refinement.sentiment.as_str()
        ));

        output.push_str("== Cleaned transcript ==\n");
        output.push_str(&wrap_text(&refinement.cleaned_text, 80));
        output.push_str("\n\n");

        if !refinement.summary.is_empty() {
            output.push_str("== Summary ==\n");
            output.push_str(&wrap_text(&refinement.summary, 80));
            output.push_str("\n\n");
        }

        if !refinement.key_points.is_empty() {
            output.push_str("== Key points ==\n");
            for point in &refinement.key_points {
                output.push_str(&format!("- {}\n", point));
            }
            output.push('\n');
        }

        if !report.segments.is_empty() {
            output.push_str("== Segments ==\n");
            for segment in &report.segments {
                let start_time = format_timestamp(seconds_to_ms(segment.start));
                output.push_str(&format!("[{}] {}\n", start_time, segment.text.trim()));
            }
            output.push('\n');
        }

        if let Some(score) = report.compatibility_score {
            output.push_str(&format!("Compatibility: {:.2}%\n\n", score));
        }

        if !report.recommendations.is_empty() {
            output.push_str("== Recommendations ==\n");
            for item in &report.recommendations {
                output.push_str(&format!("- {}\n", item));
            }
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}

/// Format milliseconds as MM:SS.mmm
fn format_timestamp(ms: u64) -> String {
    let seconds = ms / 1000;
    let millis = ms % 1000;
    let minutes = seconds / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}.{:03}", minutes, secs, millis)
}

/// Wrap text at approximately the given width (in characters)
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len + word_len + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word_len;
    }

    result
}
