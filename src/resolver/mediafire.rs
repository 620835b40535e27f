//! Mediafire share pages.
//!
//! The page embeds the direct link as an `href` pointing at a
//! `download*.mediafire.com` host; the first such attribute wins.

use std::sync::LazyLock;

use regex::Regex;

use super::ResolutionResult;
use super::utils::compile_static_regex;

static DOWNLOAD_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r#"href="(https?://download[^"]+)"#));

/// Scans the body line by line for the first `href="http(s)://download..."`.
pub(crate) fn extract_download_link(body: &str) -> ResolutionResult {
    body.lines()
        .find_map(|line| DOWNLOAD_HREF_RE.captures(line))
        .and_then(|caps| caps.get(1))
        .map_or(ResolutionResult::NotFound, |m| {
            ResolutionResult::DirectLink(m.as_str().to_string())
        })
}
