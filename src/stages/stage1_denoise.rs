use crate::rules::RuleTables;

use super::{core_word, normalize};

/// Longest run of one repeated character left after denoising
const MAX_CHAR_RUN: usize = 2;
/// Runs at least this long are collapsed
const CHAR_RUN_THRESHOLD: usize = 4;

/// Stage 1: strip fillers, stretched sounds, and stuttered words
///
/// 1. Blanks out filler words and phrases (case-insensitive, whole words)
/// 2. Shortens runs of 4+ identical characters to 2 ("noooo" -> "noo")
/// 3. Normalizes whitespace
/// 4. Drops punctuation a removed filler left stranded ("think, , it" -> "think, it")
/// 5. Collapses immediately repeated words ("the the" -> "the")
pub fn denoise(text: &str, rules: &RuleTables) -> String {
    let without_fillers = rules.blank_fillers(text);
    let squeezed = collapse_char_runs(&without_fillers);
    collapse_repeated_words(&drop_orphaned_punctuation(&normalize(&squeezed)))
}

/// Remove punctuation-only tokens at the start of the text or right after
/// a token that already ends in punctuation
fn drop_orphaned_punctuation(text: &str) -> String {
    let mut tokens: Vec<&str> = Vec::new();
    for token in text.split_whitespace() {
        let orphaned = core_word(token).is_empty()
            && tokens.last().is_none_or(|prev| core_word(prev).len() < prev.len());
        if !orphaned {
            tokens.push(token);
        }
    }
    tokens.join(" ")
}

fn collapse_char_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }
        let keep = if run >= CHAR_RUN_THRESHOLD { MAX_CHAR_RUN } else { run };
        out.extend(std::iter::repeat_n(c, keep));
    }

    out
}

fn collapse_repeated_words(text: &str) -> String {
    let mut words: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        let repeated = words
            .last()
            .is_some_and(|prev| prev.to_lowercase() == word.to_lowercase());
        if !repeated {
            words.push(word);
        }
    }
    words.join(" ")
}
