//! Qiwi share pages.
//!
//! The direct link is not in the page. It is built from the mirror prefix,
//! the file id that follows `/file/` in the share URL, and the extension of
//! the file name shown in the page's first `h1`.

use scraper::{Html, Selector};
use tracing::debug;

use super::ResolutionResult;
use super::utils::join_mirror;

const FILE_SEGMENT: &str = "/file/";

/// Builds `<mirror>/<file id>.<ext>` from the share URL and page title.
pub(crate) fn derive_download_link(source_url: &str, body: &str, mirror: &str) -> ResolutionResult {
    let Some(file_id) = file_id_from_url(source_url) else {
        debug!(url = %source_url, "share URL has no /file/ segment");
        return ResolutionResult::NotFound;
    };
    let Some(title) = first_heading_text(body) else {
        debug!(url = %source_url, "share page has no h1 title");
        return ResolutionResult::NotFound;
    };

    // A title without a dot has no extension, so the link is the bare id
    // rather than `<id>.<whole title>`.
    let link = match title.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => join_mirror(mirror, &format!("{file_id}.{ext}")),
        _ => join_mirror(mirror, file_id),
    };
    ResolutionResult::DirectLink(link)
}

/// Returns the path remainder after the first `/file/`, without query or fragment.
fn file_id_from_url(source_url: &str) -> Option<&str> {
    let (_, rest) = source_url.trim().split_once(FILE_SEGMENT)?;
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let file_id = rest[..end].trim_matches('/');
    (!file_id.is_empty()).then_some(file_id)
}

fn first_heading_text(body: &str) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;
    let document = Html::parse_document(body);
    let heading = document.select(&selector).next()?;
    let text = heading.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIRROR: &str = "https://spyderrock.com/";

    #[test]
    fn test_builds_link_from_file_id_and_title_extension() {
        let body = "<html><body><h1>report.pdf</h1></body></html>";
        assert_eq!(
            derive_download_link("https://qiwi.gg/file/XYZ123", body, MIRROR),
            ResolutionResult::DirectLink("https://spyderrock.com/XYZ123.pdf".to_string())
        );
    }

    #[test]
    fn test_uses_extension_after_last_dot() {
        let body = "<h1 class=\"title\">  my.archive.part1.rar </h1>";
        assert_eq!(
            derive_download_link("https://qiwi.gg/file/ab-cd", body, MIRROR),
            ResolutionResult::DirectLink("https://spyderrock.com/ab-cd.rar".to_string())
        );
    }

    #[test]
    fn test_uses_first_heading_only() {
        let body = "<h1>first.zip</h1><h1>second.7z</h1>";
        assert_eq!(
            derive_download_link("https://qiwi.gg/file/ID", body, MIRROR),
            ResolutionResult::DirectLink("https://spyderrock.com/ID.zip".to_string())
        );
    }

    #[test]
    fn test_heading_text_spans_nested_elements() {
        let body = "<h1><span>video</span>.mkv</h1>";
        assert_eq!(
            derive_download_link("https://qiwi.gg/file/V1", body, MIRROR),
            ResolutionResult::DirectLink("https://spyderrock.com/V1.mkv".to_string())
        );
    }

    #[test]
    fn test_title_without_extension_links_bare_id() {
        let body = "<h1>README</h1>";
        assert_eq!(
            derive_download_link("https://qiwi.gg/file/R1", body, MIRROR),
            ResolutionResult::DirectLink("https://spyderrock.com/R1".to_string())
        );
    }

    #[test]
    fn test_missing_heading_is_not_found() {
        let body = "<html><body><h2>report.pdf</h2></body></html>";
        assert_eq!(
            derive_download_link("https://qiwi.gg/file/XYZ123", body, MIRROR),
            ResolutionResult::NotFound
        );
    }

    #[test]
    fn test_url_without_file_segment_is_not_found() {
        let body = "<h1>report.pdf</h1>";
        assert_eq!(
            derive_download_link("https://qiwi.gg/folder/XYZ123", body, MIRROR),
            ResolutionResult::NotFound
        );
        assert_eq!(
            derive_download_link("https://qiwi.gg/file/", body, MIRROR),
            ResolutionResult::NotFound
        );
    }

    #[test]
    fn test_file_id_drops_query_and_fragment() {
        assert_eq!(file_id_from_url("https://qiwi.gg/file/ABC?ref=x"), Some("ABC"));
        assert_eq!(file_id_from_url("https://qiwi.gg/file/ABC/#top"), Some("ABC"));
        assert_eq!(file_id_from_url("  https://qiwi.gg/file/ABC  "), Some("ABC"));
    }

    #[test]
    fn test_mirror_without_trailing_slash() {
        let body = "<h1>a.txt</h1>";
        assert_eq!(
            derive_download_link("https://qiwi.gg/file/T", body, "https://mirror.example"),
            ResolutionResult::DirectLink("https://mirror.example/T.txt".to_string())
        );
    }
}
