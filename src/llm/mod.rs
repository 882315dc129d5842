pub mod fallback;
pub mod huggingface;
pub mod ollama;
pub mod prompts;
pub mod provider;

pub use fallback::*;
pub use huggingface::*;
pub use ollama::*;
pub use prompts::*;
pub use provider::*;
