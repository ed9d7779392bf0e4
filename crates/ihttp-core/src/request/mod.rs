//! Request builder.
//!
//! Accumulates URL, method, headers, post data and user agent, then hands the
//! request to its transport and parses what comes back. Each builder owns its
//! transport exclusively; the handle is closed when the builder is dropped.

mod method;
mod url;

pub use self::method::{Method, UnknownMethod};
pub use self::url::UrlParts;

use crate::error::{Error, Result};
use crate::response::{Response, TransferInfo};
use crate::transport::{CurlOptions, CurlTransport, PreparedRequest, Transport};

/// A reusable HTTP request bound to one transport.
pub struct Request<T: Transport = CurlTransport> {
    url: Option<String>,
    method: Method,
    headers: Vec<(String, String)>,
    data: Vec<(String, String)>,
    user_agent: Option<String>,
    transport: T,
    response: Option<Response>,
}

impl Request<CurlTransport> {
    /// Builder backed by a fresh libcurl handle with default options.
    pub fn new() -> Self {
        Self::with_options(CurlOptions::default())
    }

    pub fn with_options(options: CurlOptions) -> Self {
        Self::with_transport(CurlTransport::new(options))
    }
}

impl Default for Request<CurlTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Request<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            url: None,
            method: Method::default(),
            headers: Vec::new(),
            data: Vec::new(),
            user_agent: None,
            transport,
            response: None,
        }
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Decomposes the current URL; all parts are absent when unset.
    pub fn url_parts(&self) -> UrlParts {
        self.url.as_deref().map(UrlParts::parse).unwrap_or_default()
    }

    pub fn host(&self) -> Option<String> {
        self.url_parts().host
    }

    pub fn protocol(&self) -> Option<String> {
        self.url_parts().protocol
    }

    pub fn base_url(&self) -> Option<String> {
        self.url_parts().base_url
    }

    /// Path with leading slash, or an empty string.
    pub fn uri(&self) -> String {
        self.url_parts().uri().to_string()
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Merges `headers` into the request; a repeated name replaces the earlier value.
    pub fn set_headers<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        merge(&mut self.headers, headers);
        self
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Merges form fields to send as the request body.
    pub fn set_post_data<I, K, V>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        merge(&mut self.data, params);
        self
    }

    pub fn post_data(&self) -> &[(String, String)] {
        &self.data
    }

    pub fn set_user_agent(&mut self, agent: impl Into<String>) -> &mut Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Snapshot of what [`send`](Self::send) would hand to the transport.
    pub fn prepare(&self) -> Result<PreparedRequest> {
        let url = self.url.clone().ok_or(Error::MissingUrl)?;
        let body = if self.data.is_empty() {
            None
        } else {
            Some(
                ::url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(self.data.iter())
                    .finish(),
            )
        };
        Ok(PreparedRequest {
            url,
            method: self.method,
            headers: self.headers.clone(),
            body,
            user_agent: self.user_agent.clone(),
        })
    }

    /// Sends the request and parses the final response message.
    ///
    /// The previous response, if any, is discarded first. Blocks until the
    /// transport completes.
    pub fn send(&mut self) -> Result<&Response> {
        self.response = None;
        let request = self.prepare()?;
        tracing::debug!("sending {} {}", request.method, request.url);

        let exchange = self.transport.perform(&request)?;
        let url = request.url;

        if exchange.raw.is_empty() {
            let reason = exchange
                .error
                .unwrap_or_else(|| "no data received".to_string());
            tracing::warn!("{} did not respond: {}", url, reason);
            return Err(Error::EmptyResponse { url, reason });
        }
        if let Some(message) = exchange.error {
            return Err(Error::Transport {
                url,
                message,
                status_code: exchange.status_code,
            });
        }

        let info = TransferInfo {
            status_code: exchange.status_code,
            effective_url: exchange.effective_url,
            total_time: exchange.total_time,
        };
        let response = Response::from_raw(&url, &exchange.raw, info)
            .map_err(|source| Error::Response {
                url: url.clone(),
                source,
            })?;
        Ok(self.response.insert(response))
    }

    /// Response of the last successful [`send`](Self::send).
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn merge<I, K, V>(into: &mut Vec<(String, String)>, entries: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    for (name, value) in entries {
        let (name, value) = (name.into(), value.into());
        match into.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => into.push((name, value)),
        }
    }
}
