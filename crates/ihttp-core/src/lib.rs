//! Minimal libcurl-backed HTTP client.
//!
//! [`request::Request`] configures and sends one request at a time;
//! [`response::parse`] turns libcurl's raw output (which may contain several
//! concatenated messages) into the final response's status line, headers,
//! content type, charset and body.

pub mod config;
pub mod error;
pub mod logging;
pub mod request;
pub mod response;
pub mod transport;

pub use error::{Error, ParseError, Result};
pub use request::{Method, Request};
pub use response::Response;
