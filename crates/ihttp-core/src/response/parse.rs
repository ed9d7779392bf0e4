//! Split raw transport output into the final HTTP message and parse its header block.
//!
//! Splitting works on bytes so the body is kept exactly as received; only the
//! header block is decoded to text.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::ParseError;

/// Marks the start of a later message when libcurl concatenates several
/// (`100 Continue`, proxy `CONNECT` replies, followed redirects).
const MESSAGE_BOUNDARY: &[u8] = b"\r\n\r\nHTTP/";
/// Blank line between header block and body.
const HEADER_SEPARATOR: &[u8] = b"\r\n\r\n";
const CHARSET_PARAM: &str = "charset=";

/// `name: value`, unanchored; at most one space after the colon is dropped.
fn header_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([^:]+): ?(.*)").expect("header line pattern"))
}

/// Semicolon plus optional space between Content-Type parameters.
fn content_type_separator() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"; ?").expect("content-type separator pattern"))
}

/// The final HTTP message of a raw payload, broken into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// First line of the final message, e.g. `HTTP/1.1 200 OK`.
    pub status_line: String,
    /// Header fields keyed by name exactly as received; last occurrence wins.
    pub headers: HashMap<String, String>,
    /// Bytes after the header/body separator, untouched.
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub charset: Option<String>,
    /// Canonical form: `header block + "\r\n\r\n" + body`.
    pub raw: Vec<u8>,
}

/// Parse a raw payload into its final HTTP message.
///
/// Earlier messages that the transport prepended are discarded: everything up
/// to the last `"\r\n\r\nHTTP/"` boundary is dropped and `HTTP/` restored as
/// the start of the retained message. A body that itself contains that
/// sequence is therefore cut at its last occurrence.
pub fn parse(raw: &[u8]) -> Result<RawMessage, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }

    let message = final_message(raw);
    let split = find(message, HEADER_SEPARATOR).ok_or(ParseError::Malformed)?;
    let (header_block, body) = (
        &message[..split],
        &message[split + HEADER_SEPARATOR.len()..],
    );

    // Header fields are ASCII on the wire; anything else is replaced.
    let header_text = String::from_utf8_lossy(header_block);
    let mut lines = header_text.split('\n').map(str::trim);
    let status_line = lines.next().unwrap_or_default().to_string();

    let mut headers = HashMap::new();
    let mut content_type = None;
    let mut charset = None;

    for line in lines {
        let Some(caps) = header_line_pattern().captures(line) else {
            continue;
        };
        let name = &caps[1];
        let value = &caps[2];

        if name.eq_ignore_ascii_case("content-type") {
            let (media_type, param) = split_content_type(value);
            content_type = Some(media_type);
            // A later Content-Type without charset keeps the earlier one.
            if param.is_some() {
                charset = param;
            }
        }
        headers.insert(name.to_string(), value.to_string());
    }

    Ok(RawMessage {
        status_line,
        headers,
        body: body.to_vec(),
        content_type,
        charset,
        raw: [header_block, HEADER_SEPARATOR, body].concat(),
    })
}

/// Slice of `raw` holding the last HTTP message.
fn final_message(raw: &[u8]) -> &[u8] {
    match rfind(raw, MESSAGE_BOUNDARY) {
        // Keep the "HTTP/" that opens the final message.
        Some(idx) => &raw[idx + HEADER_SEPARATOR.len()..],
        None => raw,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

/// Media type and non-empty charset of a Content-Type value.
fn split_content_type(value: &str) -> (String, Option<String>) {
    let mut segments = content_type_separator().split(value);
    let media_type = segments.next().unwrap_or_default().to_string();
    let charset = segments
        .next()
        .and_then(|param| param.trim_start().strip_prefix(CHARSET_PARAM))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    (media_type, charset)
}
