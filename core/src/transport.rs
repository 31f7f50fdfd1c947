//! The seam between the facade and the code that performs network I/O.
//!
//! # Design
//! `HttpHelper` only composes `HttpRequest` values; a `Transport` executes
//! them. One `execute` call covers all four verbs: GET and DELETE carry
//! `query`, POST and PUT carry `body`. `UreqTransport` is the default
//! blocking implementation. Tests substitute a recording transport.

use std::fmt;
use std::io::ErrorKind;
use std::time::Duration;

use tracing::debug;
use ureq::http::Response;
use ureq::typestate::WithBody;
use ureq::{Agent, Body, RequestBuilder};

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Executes a composed request and returns whatever response came back.
///
/// Implementations must return non-2xx statuses as `Ok` responses and only
/// use `Err` when no response was received.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Settings for `UreqTransport`.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Overall deadline per request. `None` keeps ureq's defaults.
    pub timeout: Option<Duration>,
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// The agent owns connection reuse; cloning the transport shares it.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_config(&TransportConfig::default())
    }

    pub fn with_config(config: &TransportConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
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

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => prepare(self.agent.get(url), request).call(),
            HttpMethod::Delete => prepare(self.agent.delete(url), request).call(),
            HttpMethod::Post => send(prepare(self.agent.post(url), request), &request.body),
            HttpMethod::Put => send(prepare(self.agent.put(url), request), &request.body),
        };

        let mut response = result.map_err(|err| {
            debug!(method = %request.method, url, error = %err, "transport failed");
            TransportError::from(err)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // ureq caps `read_to_vec` at 10 MiB by default; a complete response is
        // never an error, whatever its size.
        let body = response.body_mut().with_config().limit(u64::MAX).read_to_vec()?;

        debug!(method = %request.method, url, status, bytes = body.len(), "response received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Attach headers and query parameters. Valid for every verb.
fn prepare<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    builder
}

fn send(
    builder: RequestBuilder<WithBody>,
    body: &RequestBody,
) -> Result<Response<Body>, ureq::Error> {
    match body {
        RequestBody::Empty => builder.send_empty(),
        RequestBody::Form(form) => builder.send_form(form.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
        RequestBody::Json(value) => {
            let payload = value.to_string();
            builder.content_type("application/json").send(payload.as_bytes())
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        let message = err.to_string();
        match err {
            ureq::Error::Timeout(_) => TransportError::Timeout(message),
            ureq::Error::HostNotFound => TransportError::Dns(message),
            ureq::Error::ConnectionFailed => TransportError::Connection(message),
            ureq::Error::BadUri(_) => TransportError::InvalidUrl(message),
            ureq::Error::Tls(_) => TransportError::Tls(message),
            ureq::Error::Io(io) => match io.kind() {
                ErrorKind::ConnectionRefused
                | ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::NotConnected => TransportError::Connection(message),
                ErrorKind::TimedOut => TransportError::Timeout(message),
                _ => TransportError::Io(message),
            },
            _ => TransportError::Other(message),
        }
    }
}
