pub mod stage0_normalize;
pub mod stage1_denoise;
pub mod stage2_structure;
pub mod stage3_lexical;
pub mod stage4_coherence;
pub mod stage5_rephrase;

pub use stage0_normalize::*;
pub use stage1_denoise::*;
pub use stage2_structure::*;
pub use stage3_lexical::*;
pub use stage4_coherence::*;
pub use stage5_rephrase::*;

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::rules::Language;

/// Characters that end a sentence
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Punctuation that may trail a word without being part of it
const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '،', '؟', '؛'];

/// Output of every local stage for one input, in order
#[derive(Debug, Clone, Serialize)]
pub struct StageTrace {
    pub normalized: String,
    pub denoised: String,
    pub structured: String,
    pub corrected: String,
    pub coherent: String,
    pub rephrased: String,
}

/// The five-stage rule pipeline
///
/// Every stage is deterministic and total, and needs no network access.
#[derive(Debug, Clone, Copy)]
pub struct LocalPipeline {
    language: Language,
}

impl Default for LocalPipeline {
    fn default() -> Self {
        Self::new(Language::Arabic)
    }
}

impl LocalPipeline {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Run all five stages over `text`
    ///
    /// Blank input comes back untouched. If the stages reduce non-blank input
    /// to nothing (e.g. only short fragments), the normalized input is
    /// returned instead.
    pub fn refine(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let trace = self.trace(text);
        if trace.rephrased.is_empty() {
            debug!("Local pipeline produced empty output, keeping normalized input");
            return trace.normalized;
        }
        trace.rephrased
    }

    /// Run all five stages and keep each intermediate result
    pub fn trace(&self, text: &str) -> StageTrace {
        let rules = self.language.rules();

        let normalized = normalize(text);
        let denoised = denoise(&normalized, rules);
        debug!("Stage 1 (denoise): {} -> {} chars", normalized.len(), denoised.len());

        let structured = split_structure(&denoised, rules);
        debug!("Stage 2 (structure): {} chars", structured.len());

        let corrected = correct_lexicon(&structured, rules);
        debug!("Stage 3 (lexical): {} chars", corrected.len());

        let coherent = improve_coherence(&corrected, rules);
        debug!("Stage 4 (coherence): {} chars", coherent.len());

        let rephrased = rephrase_professionally(&coherent, rules);
        debug!("Stage 5 (rephrase): {} chars", rephrased.len());

        StageTrace {
            normalized,
            denoised,
            structured,
            corrected,
            coherent,
            rephrased,
        }
    }
}

/// Refine `text` with the default (Arabic) rule tables
pub fn refine_local(text: &str) -> String {
    LocalPipeline::default().refine(text)
}

/// A sentence body and the terminator that closed it, if any
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sentence {
    pub body: String,
    pub terminator: Option<char>,
}

impl Sentence {
    pub fn render(&self) -> String {
        match self.terminator {
            Some(t) => format!("{}{}", self.body, t),
            None => self.body.clone(),
        }
    }
}

/// Split on runs of terminators; a run keeps only its first character
pub(crate) fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut body = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if TERMINATORS.contains(&c) {
            while chars.peek().is_some_and(|n| TERMINATORS.contains(n)) {
                chars.next();
            }
            sentences.push(Sentence {
                body: body.trim().to_string(),
                terminator: Some(c),
            });
            body.clear();
        } else {
            body.push(c);
        }
    }

    if !body.trim().is_empty() {
        sentences.push(Sentence {
            body: body.trim().to_string(),
            terminator: None,
        });
    }

    sentences
}

/// A word without its trailing punctuation
pub(crate) fn core_word(token: &str) -> &str {
    token.trim_end_matches(TRAILING_PUNCTUATION)
}

/// Replace whole tokens found in `table`, keeping trailing punctuation
///
/// Lookup is on the lowercased word; each token is substituted at most once.
pub(crate) fn substitute_tokens(text: &str, table: &HashMap<&'static str, &'static str>) -> String {
    text.split_whitespace()
        .map(|token| {
            let word = core_word(token);
            let suffix = &token[word.len()..];
            match table.get(word.to_lowercase().as_str()) {
                Some(replacement) if !word.is_empty() => format!("{replacement}{suffix}"),
                _ => token.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
