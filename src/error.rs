use thiserror::Error;

/// Errors raised by the refinement and analysis layer
///
/// Most remote failures never reach a caller as `Err`: adapters log them and
/// return `None`, and best-effort operations degrade to the input text.
#[derive(Error, Debug)]
pub enum RefineError {
    /// Network failure, timeout, or non-2xx response from a remote backend
    #[error("transport error calling {model}: {message}")]
    Transport { model: String, message: String },

    /// A response body that could not be decoded into the expected shape
    #[error("failed to parse response from {model}: {message}")]
    Parse { model: String, message: String },

    /// A required credential or setting is missing or invalid
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No backend capable of the requested operation is installed
    #[error("no backend available: {0}")]
    UnavailableBackend(String),

    /// The transcription input does not exist
    #[error("transcription input not found: {0}")]
    TranscriptNotFound(String),
}

impl RefineError {
    pub fn transport(model: &str, message: impl Into<String>) -> Self {
        Self::Transport {
            model: model.to_string(),
            message: message.into(),
        }
    }

    pub fn parse(model: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            model: model.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RefineError>;
