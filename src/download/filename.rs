//! Filename extraction and sanitization for terminal file responses.
//!
//! File-locker hosts put raw UTF-8 octets into `Content-Disposition`. HTTP
//! stacks that treat header values as ISO-8859-1 show them as mojibake, so
//! the octets are decoded as UTF-8 first and only fall back to ISO-8859-1
//! when they are not valid UTF-8.

use std::path::{Component, Path};

use reqwest::header::HeaderValue;
use url::Url;

/// Name used when neither the header nor the URL yields a filename.
pub(crate) const FALLBACK_FILENAME: &str = "download.bin";

/// Decodes raw header octets, preferring UTF-8 over ISO-8859-1.
#[must_use]
pub(crate) fn decode_header_value(value: &HeaderValue) -> String {
    decode_header_bytes(value.as_bytes())
}

fn decode_header_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().copied().map(char::from).collect(),
    }
}

/// Parses Content-Disposition header to extract filename.
///
/// Handles:
/// - `attachment; filename="example.pdf"`
/// - `attachment; filename=example.pdf`
/// - `attachment; filename*=UTF-8''example.pdf` (RFC 5987, takes precedence)
pub(crate) fn parse_content_disposition(header: &str) -> Option<String> {
    // Try filename*= first (RFC 5987 encoded)
    if let Some(pos) = header.find("filename*=") {
        let value = header[pos + 10..].trim();
        // Format: charset'language'encoded_value
        if let Some(quote_pos) = value.find("''") {
            let encoded = &value[quote_pos + 2..];
            let end = encoded.find(';').unwrap_or(encoded.len());
            let encoded_name = encoded[..end].trim().trim_matches('"');
            if let Ok(decoded) = urlencoding::decode(encoded_name)
                && !decoded.is_empty()
            {
                return Some(decoded.into_owned());
            }
        }
    }

    // Try regular filename=
    if let Some(pos) = header.find("filename=") {
        let value = header[pos + 9..].trim();

        // Handle quoted filename
        let filename = if let Some(stripped) = value.strip_prefix('"') {
            stripped.find('"').map(|end| &stripped[..end])
        } else {
            // Unquoted - take until ; or end
            let end = value.find(';').unwrap_or(value.len());
            Some(value[..end].trim())
        };
        if let Some(filename) = filename.filter(|name| !name.is_empty()) {
            return Some(filename.to_string());
        }
    }

    None
}

/// Sanitizes filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems
/// (`/ \ : * ? " < > |` and control characters) and rewrites `.`/`..`.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized.replace('.', "_")
    }
}

pub(crate) fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Fallback filename derived from the last URL path segment.
pub(crate) fn fallback_filename_from_url(url: &Url) -> String {
    if let Some(mut segments) = url.path_segments()
        && let Some(last) = segments.next_back()
        && !last.is_empty()
    {
        let decoded = urlencoding::decode(last).map_or_else(|_| last.to_string(), |d| d.into_owned());
        return sanitize_filename(&decoded);
    }
    FALLBACK_FILENAME.to_string()
}

/// Determines the local filename for a terminal response.
pub(crate) fn filename_for_response(disposition: Option<&HeaderValue>, url: &Url) -> String {
    disposition
        .map(decode_header_value)
        .and_then(|header| parse_content_disposition(&header))
        .map_or_else(|| fallback_filename_from_url(url), |name| sanitize_filename(&name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_header_bytes_utf8_octets() {
        // "café.zip" as raw UTF-8 octets, the way the remote host sends it.
        let raw = "attachment; filename=\"caf\u{e9}.zip\"".as_bytes();
        assert_eq!(decode_header_bytes(raw), "attachment; filename=\"café.zip\"");
    }

    #[test]
    fn test_decode_header_bytes_latin1_fallback() {
        let raw = b"attachment; filename=\"caf\xe9.zip\"";
        assert_eq!(decode_header_bytes(raw), "attachment; filename=\"café.zip\"");
    }

    #[test]
    fn test_decode_header_value_from_reqwest() {
        let value = HeaderValue::from_bytes("attachment; filename=\"日本語.zip\"".as_bytes()).unwrap();
        assert_eq!(decode_header_value(&value), "attachment; filename=\"日本語.zip\"");
    }

    #[test]
    fn test_parse_content_disposition_quoted() {
        let header = r#"attachment; filename="report part 1.zip""#;
        assert_eq!(
            parse_content_disposition(header),
            Some("report part 1.zip".to_string())
        );
    }

    #[test]
    fn test_parse_content_disposition_unquoted() {
        let header = "attachment; filename=example.pdf";
        assert_eq!(
            parse_content_disposition(header),
            Some("example.pdf".to_string())
        );
    }

    #[test]
    fn test_parse_content_disposition_with_semicolon() {
        let header = r#"attachment; filename="example.pdf"; size=1234"#;
        assert_eq!(
            parse_content_disposition(header),
            Some("example.pdf".to_string())
        );
    }

    #[test]
    fn test_parse_content_disposition_rfc5987() {
        let header = "attachment; filename*=UTF-8''example%20file.pdf";
        assert_eq!(
            parse_content_disposition(header),
            Some("example file.pdf".to_string())
        );
    }

    #[test]
    fn test_parse_content_disposition_rfc5987_wins_over_plain() {
        let header = "attachment; filename=\"fallback.pdf\"; filename*=UTF-8''r%C3%A9sum%C3%A9.pdf";
        assert_eq!(
            parse_content_disposition(header),
            Some("résumé.pdf".to_string())
        );
    }

    #[test]
    fn test_parse_content_disposition_missing() {
        assert_eq!(parse_content_disposition("attachment"), None);
        assert_eq!(parse_content_disposition("attachment; filename=\"\""), None);
    }

    #[test]
    fn test_sanitize_filename_removes_invalid_chars() {
        assert_eq!(sanitize_filename("file/name.pdf"), "file_name.pdf");
        assert_eq!(sanitize_filename("file\\name.pdf"), "file_name.pdf");
        assert_eq!(sanitize_filename("file:name.pdf"), "file_name.pdf");
        assert_eq!(sanitize_filename("file<name>.pdf"), "file_name_.pdf");
        assert_eq!(sanitize_filename("file|name.pdf"), "file_name.pdf");
    }

    #[test]
    fn test_sanitize_filename_rewrites_dot_segments() {
        assert_eq!(sanitize_filename("."), "_");
        assert_eq!(sanitize_filename(".."), "__");
        assert_eq!(sanitize_filename("   "), FALLBACK_FILENAME);
    }

    #[test]
    fn test_sanitize_filename_preserves_valid_chars() {
        assert_eq!(sanitize_filename("report part 1.zip"), "report part 1.zip");
        assert_eq!(sanitize_filename("file (1).pdf"), "file (1).pdf");
        assert_eq!(sanitize_filename("日本語.pdf"), "日本語.pdf");
    }

    #[test]
    fn test_fallback_filename_from_url() {
        let url = Url::parse("https://download.example.com/abc/my%20file.zip").unwrap();
        assert_eq!(fallback_filename_from_url(&url), "my file.zip");

        let url = Url::parse("https://download.example.com/").unwrap();
        assert_eq!(fallback_filename_from_url(&url), FALLBACK_FILENAME);
    }

    #[test]
    fn test_filename_for_response_prefers_header() {
        let url = Url::parse("https://download.example.com/abc/url-name.zip").unwrap();
        let header = HeaderValue::from_static(r#"attachment; filename="../evil.zip""#);
        assert_eq!(filename_for_response(Some(&header), &url), ".._evil.zip");

        let header = HeaderValue::from_static("inline");
        assert_eq!(filename_for_response(Some(&header), &url), "url-name.zip");
        assert_eq!(filename_for_response(None, &url), "url-name.zip");
    }
}
