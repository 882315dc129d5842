pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod rules;
pub mod stages;
pub mod transcription;

pub use analysis::{AnalysisAggregator, compatibility_score, recommendations};
pub use config::{AppConfig, RefineMode};
pub use error::{RefineError, Result};
pub use io::{HumanReport, ProcessingReport, load_document, load_transcript};
pub use llm::{
    GenerationFallbackChain, HuggingFaceClient, OllamaClient, OllamaConfig, ProviderAdapter,
};
pub use models::{
    CvAnalysis, JobAnalysis, RefinementMethod, RefinementResult, Segment, Sentiment, Transcript,
};
pub use pipeline::Refiner;
pub use rules::Language;
pub use stages::{LocalPipeline, StageTrace, normalize, refine_local};
pub use transcription::{SidecarTranscriber, Transcriber};
