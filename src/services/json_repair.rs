//! Best-effort cleanup of near-JSON text returned by the completion model.
//!
//! Models wrap JSON in markdown fences, chat around it, leak control
//! characters into strings and stop mid-object when they run out of tokens.
//! Each step below handles one of those; `repair_json` runs them in order and
//! stops as soon as the text parses.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::ServiceError;

static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x1f\x7f-\x9f]").expect("valid control-char pattern"));

const FENCE: &str = "```";

/// Body of a leading triple-backtick block, without its language tag.
///
/// Returns `None` when the text does not start with a fence.
pub fn strip_code_fence(content: &str) -> Option<&str> {
    let rest = content.trim_start().strip_prefix(FENCE)?;
    let body = match rest.find(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    };

    let body = match body.split_once('\n') {
        Some((tag, remainder)) if is_language_tag(tag) => remainder,
        _ => body.strip_prefix("json").unwrap_or(body),
    };
    Some(body.trim())
}

fn is_language_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// From the first `{` through the last `}`; to the end of the text if no
/// closing brace follows the opening one.
pub fn slice_braces(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    match content.rfind('}') {
        Some(end) if end > start => Some(&content[start..=end]),
        _ => Some(&content[start..]),
    }
}

/// From the first `{` through the last `}`, only when both exist in order.
pub fn braced_span(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Drop C0 and C1 control characters (this includes raw newlines and tabs).
pub fn strip_control_chars(content: &str) -> String {
    CONTROL_CHARS.replace_all(content, "").into_owned()
}

/// Append one `}` per unmatched `{`. Brackets and nesting are not checked.
pub fn balance_braces(content: &str) -> String {
    let opens = content.matches('{').count();
    let closes = content.matches('}').count();
    let mut balanced = content.to_string();
    if opens > closes {
        balanced.push_str(&"}".repeat(opens - closes));
    }
    balanced
}

/// Run the repair steps in order until the text parses as JSON.
pub fn repair_json(content: &str) -> Result<Value, ServiceError> {
    let trimmed = content.trim();
    let candidate = match strip_code_fence(trimmed) {
        Some(body) => body,
        None => slice_braces(trimmed).unwrap_or(trimmed),
    };
    if let Ok(value) = serde_json::from_str(candidate) {
        return Ok(value);
    }

    let cleaned = strip_control_chars(candidate);
    if let Ok(value) = serde_json::from_str(&cleaned) {
        return Ok(value);
    }

    let balanced = balance_braces(&cleaned);
    serde_json::from_str(&balanced).map_err(|e| ServiceError::Repair(e.to_string()))
}
