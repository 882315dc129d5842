use crate::rules::RuleTables;

use super::{TERMINATORS, split_sentences};

/// Stage 4: smooth connectives between and at the start of sentences
///
/// Applies the literal replacement rules in order (doubled connectives,
/// doubled spaces), then rewrites the first matching connective+pronoun
/// opener of each sentence.
pub fn improve_coherence(text: &str, rules: &RuleTables) -> String {
    let mut improved = text.to_string();
    for (from, to) in rules.coherence {
        improved = replace_bounded(&improved, from, to);
    }

    split_sentences(&improved)
        .into_iter()
        .map(|mut sentence| {
            sentence.body = rewrite_opener(&sentence.body, rules.sentence_starters);
            sentence.render()
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Replace `from` with `to` only where `from` is not part of a larger word
fn replace_bounded(text: &str, from: &str, to: &str) -> String {
    if from.trim().is_empty() {
        return text.replace(from, to);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(from) {
        let before = rest[..pos].chars().next_back().or_else(|| out.chars().next_back());
        let after = rest[pos + from.len()..].chars().next();
        let left_ok = before.is_none_or(|c| c.is_whitespace() || TERMINATORS.contains(&c));
        let right_ok = after.is_none_or(|c| !c.is_alphanumeric());

        out.push_str(&rest[..pos]);
        if left_ok && right_ok {
            out.push_str(to);
        } else {
            out.push_str(from);
        }
        rest = &rest[pos + from.len()..];
    }

    out.push_str(rest);
    out
}

/// First matching opener wins; matching ignores ASCII case
fn rewrite_opener(body: &str, starters: &[(&str, &str)]) -> String {
    for (from, to) in starters {
        let matches = body.len() > from.len()
            && body.is_char_boundary(from.len())
            && body[..from.len()].eq_ignore_ascii_case(from);
        if matches {
            return format!("{}{}", to, &body[from.len()..]);
        }
    }
    body.to_string()
}
