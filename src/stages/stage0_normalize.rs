use serde_json::Value;

/// Collapse every whitespace run to a single space and trim both ends
///
/// Applied to every text before it reaches a rule stage or a remote backend.
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an untyped value; anything other than a JSON string becomes ""
pub fn normalize_value(value: &Value) -> String {
    match value {
        Value::String(text) => normalize(text),
        _ => String::new(),
    }
}
