//! The network seam between the dispatcher and the outside world.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and returns the `HttpResponse` as
//! data, whatever its status. Only a request that never completed is an
//! error (`TransportError`); status interpretation stays in the dispatcher.
//! Tests substitute their own implementation to simulate responses.

use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, RequestBuilder};

use crate::error::DispatchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, DispatchError>;
}

/// Blocking transport backed by a shared `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// 4xx/5xx responses are returned as data rather than `Err`.
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, DispatchError> {
        let url = request.url.as_str();
        let headers = request.headers.as_slice();
        let body = request.body.as_deref().map(str::as_bytes);

        let result = match request.method {
            HttpMethod::Get => send_without_body(self.agent.get(url), headers, body),
            HttpMethod::Delete => send_without_body(self.agent.delete(url), headers, body),
            HttpMethod::Options => send_without_body(self.agent.options(url), headers, body),
            HttpMethod::Head => send_without_body(self.agent.head(url), headers, body),
            HttpMethod::Post => send_with_body(self.agent.post(url), headers, body),
            HttpMethod::Put => send_with_body(self.agent.put(url), headers, body),
            HttpMethod::Patch => send_with_body(self.agent.patch(url), headers, body),
        };
        let mut response = result.map_err(|e| DispatchError::TransportError(e.to_string()))?;

        let status = response.status();
        let response_headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| DispatchError::TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers: response_headers,
            body,
        })
    }
}

type UreqResult = Result<ureq::http::Response<ureq::Body>, ureq::Error>;

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Verbs ureq treats as bodiless still carry a payload when one was built.
fn send_without_body(
    builder: RequestBuilder<WithoutBody>,
    headers: &[(String, String)],
    body: Option<&[u8]>,
) -> UreqResult {
    let builder = with_headers(builder, headers);
    match body {
        Some(bytes) => builder.force_send_body().send(bytes),
        None => builder.call(),
    }
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    headers: &[(String, String)],
    body: Option<&[u8]>,
) -> UreqResult {
    let builder = with_headers(builder, headers);
    match body {
        Some(bytes) => builder.send(bytes),
        None => builder.send_empty(),
    }
}
