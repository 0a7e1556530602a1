use std::sync::LazyLock;

use regex::Regex;

/// A lone letter, optionally followed by a period, then whitespace.
static INITIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]\.?\s+").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize a display name for matching: lowercase, drop single-letter
/// initials, collapse whitespace, trim.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let without_initials = INITIAL_RE.replace_all(&lowered, " ");
    WHITESPACE_RE
        .replace_all(&without_initials, " ")
        .trim()
        .to_owned()
}
