pub mod arabic;
pub mod english;

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Transcript language, selects which rule tables the local pipeline uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    English,
}

impl Language {
    /// Map a language code to a rule language; anything not English is Arabic
    pub fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("en") {
            Self::English
        } else {
            Self::Arabic
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Arabic => "ar",
            Self::English => "en",
        }
    }

    /// Compiled rule tables for this language
    pub fn rules(&self) -> &'static RuleTables {
        match self {
            Self::Arabic => &ARABIC_RULES,
            Self::English => &ENGLISH_RULES,
        }
    }
}

/// Raw rule data for one language, as ordered literal tables
pub struct RuleSource {
    pub fillers: &'static [&'static str],
    pub connectives: &'static [&'static str],
    pub corrections: &'static [(&'static str, &'static str)],
    pub coherence: &'static [(&'static str, &'static str)],
    pub sentence_starters: &'static [(&'static str, &'static str)],
    pub professional: &'static [(&'static str, &'static str)],
}

/// Immutable lookup structures built once from a [`RuleSource`]
pub struct RuleTables {
    /// Filler words and phrases, matched on word boundaries, case-insensitive
    filler_pattern: Option<Regex>,
    /// Words at which over-long sentences may be split
    pub connectives: &'static [&'static str],
    /// Dialectal/informal token -> standard form
    pub corrections: HashMap<&'static str, &'static str>,
    /// Literal replacements applied in order
    pub coherence: &'static [(&'static str, &'static str)],
    /// Sentence-initial rewrites applied in order
    pub sentence_starters: &'static [(&'static str, &'static str)],
    /// Colloquial verb -> formal equivalent
    pub professional: HashMap<&'static str, &'static str>,
}

impl RuleTables {
    fn compile(source: &RuleSource) -> Self {
        // Longest alternatives first so phrases win over their prefixes
        let mut fillers: Vec<&str> = source.fillers.to_vec();
        fillers.sort_by_key(|f| std::cmp::Reverse(f.chars().count()));
        let alternatives: Vec<String> = fillers.iter().map(|f| filler_alternative(f)).collect();
        let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));

        Self {
            filler_pattern: Regex::new(&pattern)
                .map_err(|e| tracing::error!("Filler pattern failed to compile: {}", e))
                .ok(),
            connectives: source.connectives,
            corrections: source.corrections.iter().copied().collect(),
            coherence: source.coherence,
            sentence_starters: source.sentence_starters,
            professional: source.professional.iter().copied().collect(),
        }
    }

    pub fn is_connective(&self, word: &str) -> bool {
        self.connectives.contains(&word)
    }

    /// Replace every filler occurrence with a single space
    pub fn blank_fillers(&self, text: &str) -> String {
        match &self.filler_pattern {
            Some(re) => re.replace_all(text, " ").into_owned(),
            None => text.to_string(),
        }
    }
}

/// A filler entry ending in `+` means its last character may repeat
fn filler_alternative(filler: &str) -> String {
    match filler.strip_suffix('+') {
        Some(stem) => format!("{}+", regex::escape(stem)),
        None => regex::escape(filler),
    }
}

static ARABIC_RULES: LazyLock<RuleTables> = LazyLock::new(|| RuleTables::compile(&arabic::RULES));
static ENGLISH_RULES: LazyLock<RuleTables> =
    LazyLock::new(|| RuleTables::compile(&english::RULES));

/// Technical keywords looked for in résumés and job descriptions, in priority order
pub const TECH_KEYWORDS: &[&str] = &[
    "python",
    "javascript",
    "react",
    "node",
    "django",
    "flask",
    "machine learning",
    "data analysis",
    "sql",
    "mongodb",
    "aws",
    "docker",
    "git",
    "api",
    "frontend",
    "backend",
];

pub const SENIOR_MARKERS: &[&str] = &["senior", "5+ years", "7+ years", "10+ years"];
pub const MID_MARKERS: &[&str] = &["mid", "2-5 years", "3-5 years"];
pub const JUNIOR_MARKERS: &[&str] = &["junior", "entry", "0-2 years", "1-3 years"];
