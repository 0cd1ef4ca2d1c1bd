//! Note payload unwrapping.

use serde_json::Value;

/// JSON properties checked, in order, for a wrapped note body.
const WRAPPER_KEYS: &[&str] = &["note", "content", "text", "physician_note"];

/// Unwrap a note payload. JSON objects carrying the note under a known
/// property yield that property's string; anything else (plain text, JSON
/// that is not an object, unknown shapes) passes through verbatim.
pub fn unwrap_note_text(payload: &str) -> String {
    let trimmed = payload.trim_start();
    if !trimmed.starts_with('{') {
        return payload.to_string();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => {
            for key in WRAPPER_KEYS {
                if let Some(Value::String(body)) = map.get(*key) {
                    return body.clone();
                }
            }
            payload.to_string()
        }
        _ => payload.to_string(),
    }
}
