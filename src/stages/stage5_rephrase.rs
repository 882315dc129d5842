use crate::rules::RuleTables;

use super::{split_sentences, substitute_tokens};

/// Stage 5: formal vocabulary and final punctuation
///
/// Swaps colloquial verbs for formal ones, capitalizes the first character of
/// each sentence, joins sentences with ". " and ensures a closing period.
pub fn rephrase_professionally(text: &str, rules: &RuleTables) -> String {
    let substituted = substitute_tokens(text, &rules.professional);

    let mut result = split_sentences(&substituted)
        .into_iter()
        .map(|s| capitalize_first(&s.body))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(". ");

    if !result.is_empty() && !result.ends_with(['.', '!', '?']) {
        result.push('.');
    }
    result
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
