//! Amount edit filtering

use regex::Regex;
use std::sync::LazyLock;

static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("amount pattern is valid"));

/// Returns `candidate` if it is a non-negative decimal (or empty), otherwise
/// keeps `previous`. Rejected edits are dropped silently.
pub fn sanitize(candidate: &str, previous: &str) -> String {
    if is_valid_amount(candidate) {
        candidate.to_string()
    } else {
        previous.to_string()
    }
}

pub fn is_valid_amount(text: &str) -> bool {
    text.is_empty() || AMOUNT_PATTERN.is_match(text)
}
