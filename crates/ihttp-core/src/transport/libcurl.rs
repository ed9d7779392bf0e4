//! libcurl-backed transport using one `Easy` handle per builder.

use curl::easy::{Auth, Easy, List};
use std::time::Duration;

use super::{Exchange, PreparedRequest, Transport};
use crate::error::Result;
use crate::request::Method;

/// Handle-level libcurl settings shared by every request on a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurlOptions {
    /// Verify the server certificate chain. Off unless configured.
    pub ssl_verify_peer: bool,
    pub follow_redirects: bool,
    /// Redirect limit (None = libcurl default).
    pub max_redirections: Option<u32>,
    pub connect_timeout: Option<Duration>,
    /// Whole-transfer timeout (None = wait as long as libcurl does).
    pub timeout: Option<Duration>,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            ssl_verify_peer: false,
            follow_redirects: true,
            max_redirections: None,
            connect_timeout: None,
            timeout: None,
        }
    }
}

/// Owns a libcurl easy handle for the lifetime of one request builder.
///
/// The handle is reset before every transfer so per-request settings
/// (method, headers, body) never leak into the next one. Dropping the
/// transport drops the inner [`Easy`], which closes the libcurl handle.
pub struct CurlTransport {
    easy: Easy,
    options: CurlOptions,
}

impl CurlTransport {
    pub fn new(options: CurlOptions) -> Self {
        if !options.ssl_verify_peer {
            tracing::warn!("TLS peer verification is disabled for this client");
        }
        Self {
            easy: Easy::new(),
            options,
        }
    }

    pub fn options(&self) -> &CurlOptions {
        &self.options
    }

    fn configure(&mut self, request: &PreparedRequest) -> std::result::Result<(), curl::Error> {
        let opts = self.options;
        let easy = &mut self.easy;
        easy.reset();

        easy.url(&request.url)?;
        easy.show_header(true)?; // headers of every hop land in the output
        easy.follow_location(opts.follow_redirects)?;
        if let Some(n) = opts.max_redirections {
            easy.max_redirections(n)?;
        }
        easy.ssl_verify_peer(opts.ssl_verify_peer)?;
        if let Some(t) = opts.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = opts.timeout {
            easy.timeout(t)?;
        }

        let mut auth = Auth::new();
        auth.basic(true).digest(true).gssnegotiate(true).ntlm(true);
        easy.http_auth(&auth)?;

        if let Some(agent) = &request.user_agent {
            easy.useragent(agent)?;
        }

        match request.method {
            Method::Get => easy.get(true)?,
            Method::Post => {
                easy.post(true)?;
                if request.body.is_none() {
                    easy.post_fields_copy(&[])?;
                }
            }
            Method::Put => easy.custom_request("PUT")?,
            Method::Head => easy.nobody(true)?,
        }

        if !request.headers.is_empty() {
            let mut list = List::new();
            for (name, value) in &request.headers {
                list.append(&format!("{}: {}", name.trim(), value.trim()))?;
            }
            easy.http_headers(list)?;
        }

        // Setting a body turns a GET into a POST, as libcurl does natively.
        if let Some(body) = &request.body {
            easy.post_fields_copy(body.as_bytes())?;
        }

        Ok(())
    }
}

impl Transport for CurlTransport {
    fn perform(&mut self, request: &PreparedRequest) -> Result<Exchange> {
        self.configure(request)?;

        let mut raw = Vec::new();
        let outcome = {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| {
                raw.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };

        let error = match outcome {
            Ok(()) => None,
            Err(e) => {
                tracing::debug!("{} {} failed: {}", request.method, request.url, e);
                Some(e.to_string())
            }
        };

        let exchange = Exchange {
            raw,
            status_code: self.easy.response_code().unwrap_or(0),
            error,
            effective_url: self
                .easy
                .effective_url()
                .ok()
                .flatten()
                .map(str::to_string),
            total_time: self.easy.total_time().unwrap_or_default(),
        };
        tracing::debug!(
            "{} {} -> HTTP {} ({} bytes in {:?})",
            request.method,
            request.url,
            exchange.status_code,
            exchange.raw.len(),
            exchange.total_time
        );
        Ok(exchange)
    }
}
