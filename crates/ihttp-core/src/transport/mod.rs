//! Network transport seam.
//!
//! The request builder hands a [`PreparedRequest`] to a [`Transport`] and gets
//! back the raw bytes plus whatever metadata the transfer produced. The
//! default implementation is [`CurlTransport`]; tests substitute their own.

mod libcurl;

pub use libcurl::{CurlOptions, CurlTransport};

use std::time::Duration;

use crate::error::Result;
use crate::request::Method;

/// Everything the transport needs to issue one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub url: String,
    pub method: Method,
    /// Header fields sent as `Name: value` lines, in order.
    pub headers: Vec<(String, String)>,
    /// Form-encoded request body, if any post data was set.
    pub body: Option<String>,
    pub user_agent: Option<String>,
}

/// Outcome of one transfer, successful or not.
#[derive(Debug, Clone, Default)]
pub struct Exchange {
    /// Bytes received: response headers (of every hop) followed by the body.
    pub raw: Vec<u8>,
    /// Last HTTP status code received; 0 if none.
    pub status_code: u32,
    /// Transport error message, when the transfer failed.
    pub error: Option<String>,
    pub effective_url: Option<String>,
    pub total_time: Duration,
}

/// Performs blocking HTTP exchanges.
///
/// A transport is owned by exactly one request builder and is released when
/// that builder is dropped.
pub trait Transport {
    /// Issues `request` and returns what came back.
    ///
    /// A network-level failure is reported through [`Exchange::error`], not
    /// as `Err`; `Err` is reserved for a request that could not be set up.
    fn perform(&mut self, request: &PreparedRequest) -> Result<Exchange>;
}
