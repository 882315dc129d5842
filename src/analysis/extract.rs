use std::collections::BTreeSet;

use crate::models::{AnalysisRecord, ExperienceLevel, MAX_KEY_POINTS, MAX_KEYWORDS};
use crate::rules::{JUNIOR_MARKERS, MID_MARKERS, SENIOR_MARKERS, TECH_KEYWORDS};
use crate::stages::TERMINATORS;

/// Sentences must be longer than this many characters to count as key points
const KEY_POINT_MIN_CHARS: usize = 20;

/// First [`MAX_KEYWORDS`] technical keywords present, in table order
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    TECH_KEYWORDS
        .iter()
        .filter(|kw| contains_term(&lower, kw))
        .take(MAX_KEYWORDS)
        .map(|kw| kw.to_string())
        .collect()
}

/// Seniority from explicit markers; senior beats mid beats junior
pub fn detect_experience_level(text: &str) -> ExperienceLevel {
    let lower = text.to_lowercase();
    let any = |markers: &[&str]| markers.iter().any(|m| contains_term(&lower, m));

    if any(SENIOR_MARKERS) {
        ExperienceLevel::Senior
    } else if any(MID_MARKERS) {
        ExperienceLevel::Mid
    } else if any(JUNIOR_MARKERS) {
        ExperienceLevel::Junior
    } else {
        ExperienceLevel::Unknown
    }
}

/// Up to three sentences longer than twenty characters, in order
pub fn extract_key_points(text: &str) -> Vec<String> {
    text.replace('۔', ".")
        .replace('،', ",")
        .split(TERMINATORS)
        .map(str::trim)
        .filter(|s| s.chars().count() > KEY_POINT_MIN_CHARS)
        .take(MAX_KEY_POINTS)
        .map(str::to_string)
        .collect()
}

/// Keyword and level fields of a record, without any remote call
pub fn local_record(text: &str) -> AnalysisRecord {
    AnalysisRecord {
        extracted_keywords: extract_keywords(text),
        derived_level: detect_experience_level(text),
        ..Default::default()
    }
}

/// `term` occurs in `haystack` and is not glued to surrounding letters or digits
fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.match_indices(term).any(|(pos, _)| {
        let before = haystack[..pos].chars().next_back();
        let after = haystack[pos + term.len()..].chars().next();
        before.is_none_or(|c| !c.is_alphanumeric()) && after.is_none_or(|c| !c.is_alphanumeric())
    })
}
