use crate::rules::RuleTables;

use super::{Sentence, core_word, split_sentences};

/// Sentences with this many tokens or fewer are dropped
pub const MIN_SENTENCE_TOKENS: usize = 2;
/// Sentences longer than this are split at a connective
pub const MAX_SENTENCE_TOKENS: usize = 20;

/// Stage 2: sentence structure pass
///
/// Splits on `.`, `!` and `?`, drops fragments of two tokens or fewer, and
/// breaks sentences over twenty tokens in two at the first connective word
/// that leaves both halves longer than two tokens. The connective opens the
/// second fragment; the first gets a full stop.
pub fn split_structure(text: &str, rules: &RuleTables) -> String {
    let mut fragments: Vec<String> = Vec::new();

    for sentence in split_sentences(text) {
        let tokens: Vec<&str> = sentence.body.split_whitespace().collect();
        if tokens.len() <= MIN_SENTENCE_TOKENS {
            continue;
        }

        if tokens.len() > MAX_SENTENCE_TOKENS {
            let split_at = (MIN_SENTENCE_TOKENS + 1..tokens.len() - MIN_SENTENCE_TOKENS)
                .find(|&i| rules.is_connective(&core_word(tokens[i]).to_lowercase()));

            if let Some(at) = split_at {
                fragments.push(format!("{}.", tokens[..at].join(" ")));
                fragments.push(
                    Sentence {
                        body: tokens[at..].join(" "),
                        terminator: sentence.terminator,
                    }
                    .render(),
                );
                continue;
            }
        }

        fragments.push(sentence.render());
    }

    fragments.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Language;

    #[test]
    fn test_drops_short_fragments() {
        let rules = Language::English.rules();
        assert_eq!(
            split_structure("ok. I fixed the bug. yes sure!", rules),
            "I fixed the bug."
        );
    }

    #[test]
    fn test_keeps_terminators_and_order() {
        let rules = Language::English.rules();
        assert_eq!(
            split_structure("Did you run it? It ran fine!! We shipped it", rules),
            "Did you run it? It ran fine! We shipped it"
        );
    }

    #[test]
    fn test_splits_long_sentence_at_first_connective() {
        let rules = Language::English.rules();
        let long = "we spent the first three weeks of the project collecting requirements from \
                    every team and then we built the prototype in two sprints";
        let result = split_structure(long, rules);
        assert_eq!(
            result,
            "we spent the first three weeks of the project collecting requirements from every team. \
             and then we built the prototype in two sprints"
        );
    }

    #[test]
    fn test_split_leaves_no_short_fragment() {
        let rules = Language::English.rules();
        let long = "we and then we spent three weeks collecting requirements from every single \
                    team because the platform had grown far too large";
        let result = split_structure(long, rules);
        assert_eq!(
            result,
            "we and then we spent three weeks collecting requirements from every single team. \
             because the platform had grown far too large"
        );
        assert_eq!(split_structure(&result, rules), result);
    }

    #[test]
    fn test_connective_near_the_end_is_not_a_split_point() {
        let rules = Language::English.rules();
        let long = "one two three four five six seven eight nine ten eleven twelve thirteen \
                    fourteen fifteen sixteen seventeen eighteen nineteen and twenty";
        assert_eq!(split_structure(long, rules), long);
    }

    #[test]
    fn test_long_sentence_without_connective_is_kept() {
        let rules = Language::English.rules();
        let long = "one two three four five six seven eight nine ten eleven twelve thirteen \
                    fourteen fifteen sixteen seventeen eighteen nineteen twenty twentyone.";
        assert_eq!(split_structure(long, rules), long);
    }

    #[test]
    fn test_arabic_connective_split() {
        let rules = Language::Arabic.rules();
        let words: Vec<String> = (0..12).map(|i| format!("كلمة{i}")).collect();
        let more: Vec<String> = (0..10).map(|i| format!("نص{i}")).collect();
        let text = format!("{} لكن {}", words.join(" "), more.join(" "));
        let result = split_structure(&text, rules);
        assert!(result.starts_with(&format!("{}.", words.join(" "))));
        assert!(result.ends_with(&format!("لكن {}", more.join(" "))));
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let rules = Language::Arabic.rules();
        assert_eq!(split_structure("", rules), "");
        assert_eq!(split_structure("?!...", rules), "");
    }
}
