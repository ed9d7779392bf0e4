//! Parsed HTTP response.
//!
//! libcurl is asked to include response headers in its output, so a transfer
//! yields one blob that may hold several messages (provisional `100 Continue`,
//! proxy `CONNECT` replies, redirect hops). [`parse`] keeps only the final one.

mod charset;
mod parse;

pub use charset::decode;
pub use parse::{parse, RawMessage};

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::ParseError;

/// Transfer metadata reported by the transport alongside the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransferInfo {
    /// Last HTTP status code libcurl received; 0 if none.
    pub status_code: u32,
    /// URL of the final hop after redirects, if known.
    pub effective_url: Option<String>,
    pub total_time: Duration,
}

/// Immutable view of one received response.
#[derive(Debug, Clone)]
pub struct Response {
    url: String,
    message: RawMessage,
    info: TransferInfo,
}

impl Response {
    /// Builds a response for `url` from a raw transport payload.
    pub fn from_raw(url: &str, raw: &[u8], info: TransferInfo) -> Result<Self, ParseError> {
        let message = parse(raw)?;
        Ok(Self {
            url: url.to_string(),
            message,
            info,
        })
    }

    /// URL the request was sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status_line(&self) -> &str {
        &self.message.status_line
    }

    /// Status code reported by the transport (0 when it reported none).
    pub fn http_code(&self) -> u32 {
        self.info.status_code
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.message.headers
    }

    /// Header value by exact, case-sensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.message.headers.get(name).map(String::as_str)
    }

    /// Body bytes exactly as received.
    pub fn body_bytes(&self) -> &[u8] {
        &self.message.body
    }

    /// Body decoded with the announced charset; see [`decode`] for fallbacks.
    pub fn body(&self) -> Cow<'_, str> {
        decode(&self.message.body, self.charset())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.message.content_type.as_deref()
    }

    pub fn charset(&self) -> Option<&str> {
        self.message.charset.as_deref()
    }

    /// Canonical `headers + "\r\n\r\n" + body` of the final message.
    pub fn raw(&self) -> &[u8] {
        &self.message.raw
    }

    pub fn info(&self) -> &TransferInfo {
        &self.info
    }
}

/// JSON shape of a response: the body is emitted as decoded text.
#[derive(Serialize)]
struct ResponseRecord<'a> {
    url: &'a str,
    status_line: &'a str,
    headers: &'a HashMap<String, String>,
    content_type: Option<&'a str>,
    charset: Option<&'a str>,
    body: Cow<'a, str>,
    info: &'a TransferInfo,
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ResponseRecord {
            url: &self.url,
            status_line: self.status_line(),
            headers: self.headers(),
            content_type: self.content_type(),
            charset: self.charset(),
            body: self.body(),
            info: &self.info,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(code: u32) -> TransferInfo {
        TransferInfo {
            status_code: code,
            ..TransferInfo::default()
        }
    }

    #[test]
    fn accessors_expose_parsed_fields() {
        let r = Response::from_raw(
            "http://localhost/page",
            b"HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=UTF-8\r\nX-Id: 7\r\n\r\n<p>hi</p>",
            info(200),
        )
        .unwrap();
        assert_eq!(r.url(), "http://localhost/page");
        assert_eq!(r.status_line(), "HTTP/1.1 200 OK");
        assert_eq!(r.http_code(), 200);
        assert_eq!(r.header("X-Id"), Some("7"));
        assert_eq!(r.header("x-id"), None);
        assert_eq!(r.body(), "<p>hi</p>");
        assert_eq!(r.content_type(), Some("text/html"));
        assert_eq!(r.charset(), Some("UTF-8"));
    }

    #[test]
    fn missing_status_metadata_is_zero() {
        let r = Response::from_raw("http://h/", b"HTTP/1.1 200 OK\r\n\r\n", TransferInfo::default())
            .unwrap();
        assert_eq!(r.http_code(), 0);
        assert!(r.info().effective_url.is_none());
    }

    #[test]
    fn from_raw_rejects_empty_payload() {
        let err = Response::from_raw("http://h/", b"", info(0)).unwrap_err();
        assert_eq!(err, ParseError::Empty);
    }

    #[test]
    fn serializes_decoded_body() {
        let r = Response::from_raw("http://h/", b"HTTP/1.1 200 OK\r\nX-A: 1\r\n\r\nok", info(200))
            .unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["status_line"], "HTTP/1.1 200 OK");
        assert_eq!(v["headers"]["X-A"], "1");
        assert_eq!(v["body"], "ok");
        assert_eq!(v["info"]["status_code"], 200);
    }

    #[test]
    fn latin1_body_decoded_by_charset() {
        let r = Response::from_raw(
            "http://h/",
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=ISO-8859-1\r\n\r\ncaf\xE9",
            info(200),
        )
        .unwrap();
        assert_eq!(r.body_bytes(), b"caf\xE9");
        assert_eq!(r.body(), "caf\u{e9}");
    }
}
