use crate::rules::RuleTables;

use super::substitute_tokens;

/// Stage 3: replace dialectal or informal tokens with their standard form
///
/// Unknown tokens pass through unchanged and token order is preserved.
pub fn correct_lexicon(text: &str, rules: &RuleTables) -> String {
    substitute_tokens(text, &rules.corrections)
}
