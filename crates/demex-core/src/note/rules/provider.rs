//! Ordering provider extraction and normalization.

use regex::Regex;

use super::patterns::{
    PROVIDER_LABEL, PROVIDER_ORDERED_BY, PROVIDER_ORDERING_PHYSICIAN, PROVIDER_TITLE,
};

/// Default when no provider pattern matches.
pub const UNKNOWN_PROVIDER: &str = "Dr. Unknown";

/// Extract the ordering provider. Patterns are tried in priority order
/// ("Ordered by", "Ordering Physician:", "Dr. <name>", "Provider:") and the
/// first match wins.
pub fn extract_ordering_provider(text: &str) -> String {
    let patterns: [&Regex; 4] = [
        &PROVIDER_ORDERED_BY,
        &PROVIDER_ORDERING_PHYSICIAN,
        &PROVIDER_TITLE,
        &PROVIDER_LABEL,
    ];

    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            return normalize_provider(&caps[1]);
        }
    }

    UNKNOWN_PROVIDER.to_string()
}

/// Canonical provider form: trimmed, no trailing periods, exactly one
/// "Dr. " prefix. Applied identically no matter which pattern matched, and
/// to provider names arriving from the assisted path.
pub fn normalize_provider(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('.').trim_end();
    let bare = strip_title(trimmed).trim();

    if bare.is_empty() {
        return UNKNOWN_PROVIDER.to_string();
    }
    format!("Dr. {bare}")
}

/// Strip a leading "Dr."/"Dr " title in any casing. "Drake" stays intact.
fn strip_title(name: &str) -> &str {
    if name.eq_ignore_ascii_case("dr") {
        return "";
    }
    if name.len() >= 3 && name[..2].eq_ignore_ascii_case("dr") {
        let rest = &name[2..];
        if let Some(stripped) = rest.strip_prefix('.') {
            return stripped.trim_start();
        }
        if rest.starts_with(char::is_whitespace) {
            return rest.trim_start();
        }
    }
    name
}
