//! Fixed-pattern decomposition of a request URL.
//!
//! Unlike `url::Url`, this accepts anything containing an `http(s)://host/path`
//! run and reports missing parts as absent instead of failing.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// `((https?)://([^/]+))(/(.*))`, case-insensitive and unanchored.
fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)((https?)://([^/]+))(/(.*))").expect("url pattern"))
}

/// Capture groups of the URL pattern. A URL without a path segment does not
/// match at all, so every part is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlParts {
    pub full_match: Option<String>,
    /// Scheme and authority, e.g. `https://example.com:8443`.
    pub base_url: Option<String>,
    pub protocol: Option<String>,
    pub host: Option<String>,
    /// Path including the leading slash, plus any query.
    pub path_with_slash: Option<String>,
    pub path: Option<String>,
}

impl UrlParts {
    pub fn parse(url: &str) -> Self {
        let Some(caps) = url_pattern().captures(url) else {
            return Self::default();
        };
        let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
        Self {
            full_match: group(0),
            base_url: group(1),
            protocol: group(2),
            host: group(3),
            path_with_slash: group(4),
            path: group(5),
        }
    }

    /// Request URI with its leading slash; empty when the URL has no path.
    pub fn uri(&self) -> &str {
        self.path_with_slash.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url() {
        let p = UrlParts::parse("https://example.com/a/b?q=1");
        assert_eq!(p.full_match.as_deref(), Some("https://example.com/a/b?q=1"));
        assert_eq!(p.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(p.protocol.as_deref(), Some("https"));
        assert_eq!(p.host.as_deref(), Some("example.com"));
        assert_eq!(p.path_with_slash.as_deref(), Some("/a/b?q=1"));
        assert_eq!(p.path.as_deref(), Some("a/b?q=1"));
        assert_eq!(p.uri(), "/a/b?q=1");
    }

    #[test]
    fn host_keeps_port_and_protocol_keeps_case() {
        let p = UrlParts::parse("HTTP://Example.com:8080/");
        assert_eq!(p.protocol.as_deref(), Some("HTTP"));
        assert_eq!(p.host.as_deref(), Some("Example.com:8080"));
        assert_eq!(p.uri(), "/");
        assert_eq!(p.path.as_deref(), Some(""));
    }

    #[test]
    fn url_without_path_has_no_parts() {
        let p = UrlParts::parse("https://example.com");
        assert_eq!(p, UrlParts::default());
        assert_eq!(p.uri(), "");
    }

    #[test]
    fn non_http_scheme_has_no_parts() {
        let p = UrlParts::parse("ftp://example.com/file");
        assert!(p.host.is_none());
        assert!(p.protocol.is_none());
    }
}
