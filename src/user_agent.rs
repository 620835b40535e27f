//! Default User-Agent for share-page and download requests.
//!
//! File-locker hosts reject or degrade requests that do not look like a
//! desktop browser, so every request goes out with a browser UA.

/// Desktop Chrome User-Agent sent when no override is configured.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_user_agent_looks_like_desktop_browser() {
        assert!(BROWSER_USER_AGENT.starts_with("Mozilla/5.0"));
        assert!(BROWSER_USER_AGENT.contains("Windows NT"));
        assert!(BROWSER_USER_AGENT.contains("Chrome/"));
        assert!(
            !BROWSER_USER_AGENT.contains("  "),
            "line continuation must not leave double spaces: {BROWSER_USER_AGENT}"
        );
    }
}
