//! Syntactic validation of source URLs.

use crate::error::{BlogcastError, Result};
use url::Url;

/// Returns true if `input` is an absolute URL with a scheme and a host.
///
/// No network check is made.
pub fn is_valid_url(input: &str) -> bool {
    parse_source_url(input).is_ok()
}

/// Parse a source URL, rejecting anything without a scheme or host.
pub fn parse_source_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed).map_err(|_| BlogcastError::InvalidUrl(input.to_string()))?;

    let has_host = url.host_str().is_some_and(|h| !h.is_empty());
    if url.scheme().is_empty() || !has_host {
        return Err(BlogcastError::InvalidUrl(input.to_string()));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_absolute_urls() {
        assert!(is_valid_url("https://example.com/post"));
        assert!(is_valid_url("http://blog.example.com/2024/01/hello-world?ref=rss"));
        assert!(is_valid_url("https://127.0.0.1:8080/a"));
        assert!(is_valid_url("  https://example.com  "));
    }

    #[test]
    fn test_rejects_missing_scheme_or_host() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("/just/a/path"));
        assert!(!is_valid_url("example.com/post"));
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("file:///etc/passwd"));
    }

    #[test]
    fn test_parse_returns_input_error() {
        let err = parse_source_url("not a url").unwrap_err();
        assert!(matches!(err, BlogcastError::InvalidUrl(ref s) if s == "not a url"));
    }
}
