//! Approximate element identity between selectors recorded by different
//! capture channels.
//!
//! These checks are deliberately loose: two selectors that share a leading
//! token can name unrelated elements. Callers only use them inside short time
//! windows.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)(?:[.#\[]|$)").expect("leading token pattern"));

/// Either selector is a substring of the other. Empty selectors never match.
pub fn contains_either(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// First word that is immediately followed by `.`, `#`, `[` or the end of the
/// selector (`button` in `button.primary`, `save` in `#save`).
pub fn leading_token(selector: &str) -> Option<&str> {
    LEADING_TOKEN_RE
        .captures(selector)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn same_element(a: &str, b: &str) -> bool {
    if contains_either(a, b) {
        return true;
    }
    match (leading_token(a), leading_token(b)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}
