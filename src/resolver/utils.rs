//! Shared helpers for resolver strategies.

use regex::Regex;

/// Compiles a regex at static init; panics on invalid pattern.
pub(crate) fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Joins a mirror prefix and a path remainder with exactly one `/`.
#[must_use]
pub(crate) fn join_mirror(mirror: &str, remainder: &str) -> String {
    format!(
        "{}/{}",
        mirror.trim_end_matches('/'),
        remainder.trim_start_matches('/')
    )
}
