//! Error types for request sending and raw response parsing.
//!
//! Every variant is terminal for the attempt that produced it: nothing here
//! is retried and no partially parsed response is handed back.

use thiserror::Error;

/// Result alias for request operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to split a raw payload into a final HTTP message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The transport handed back no bytes at all.
    #[error("empty response payload")]
    Empty,

    /// Bytes are present but there is no blank line between headers and body.
    #[error("malformed response: no header/body separator")]
    Malformed,
}

/// Errors returned by [`crate::request::Request::send`] and the transports.
#[derive(Error, Debug)]
pub enum Error {
    /// `send` was called before a URL was set.
    #[error("request URL is not set")]
    MissingUrl,

    /// The server did not respond (DNS failure, connection refused, ...).
    #[error("request error, {url} doesn't respond: {reason}")]
    EmptyResponse { url: String, reason: String },

    /// A payload arrived but could not be parsed.
    #[error("invalid response from {url}")]
    Response {
        url: String,
        #[source]
        source: ParseError,
    },

    /// libcurl reported an error after some bytes were received.
    #[error("transport error for {url} (HTTP {status_code}): {message}")]
    Transport {
        url: String,
        message: String,
        status_code: u32,
    },

    /// A libcurl option could not be applied.
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_response_names_url() {
        let e = Error::EmptyResponse {
            url: "http://example.invalid/".to_string(),
            reason: "Couldn't resolve host name".to_string(),
        };
        let msg = e.to_string();
        assert!(msg.contains("http://example.invalid/"));
        assert!(msg.contains("doesn't respond"));
    }

    #[test]
    fn response_error_keeps_parse_source() {
        let e = Error::Response {
            url: "http://localhost/".to_string(),
            source: ParseError::Malformed,
        };
        let source = std::error::Error::source(&e).expect("source");
        assert_eq!(source.to_string(), ParseError::Malformed.to_string());
    }

    #[test]
    fn transport_error_reports_status() {
        let e = Error::Transport {
            url: "http://localhost/".to_string(),
            message: "Failure when receiving data from the peer".to_string(),
            status_code: 0,
        };
        assert!(e.to_string().contains("HTTP 0"));
    }
}
