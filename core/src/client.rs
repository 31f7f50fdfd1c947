//! The `HttpHelper` facade.
//!
//! # Design
//! `HttpHelper` holds a `ClientConfig` (optional base URL plus headers) and a
//! transport. Each verb is split into a `build_*` method that composes an
//! `HttpRequest` from the current configuration and a single
//! `Transport::execute` call. The helper never inspects status codes and
//! never retries; whatever the transport returns, response or error, goes
//! straight back to the caller.
//!
//! Setters take `&mut self` and verbs take `&self`, so the configuration
//! cannot change underneath an in-flight request.

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::headers::Headers;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Params, RequestBody};
use crate::transport::{Transport, UreqTransport};

/// Synchronous facade over a `Transport`.
#[derive(Debug, Clone)]
pub struct HttpHelper<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl HttpHelper<UreqTransport> {
    /// Helper with no headers, backed by the default blocking transport.
    pub fn new(base_url: Option<&str>) -> Self {
        Self::from_config(ClientConfig::new(base_url))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> HttpHelper<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Replace the base URL. The value is not validated.
    pub fn configure(&mut self, base_url: Option<&str>) {
        self.config.base_url = base_url.map(str::to_string);
    }

    /// Replace the whole header mapping.
    pub fn set_headers(&mut self, headers: Headers) {
        self.config.headers = headers;
    }

    /// Set `Authorization: Bearer <token>`, overwriting any previous value.
    pub fn set_auth(&mut self, token: &str) {
        self.config
            .headers
            .upsert("Authorization", &format!("Bearer {token}"));
    }

    pub fn base_url(&self) -> Option<&str> {
        self.config.base_url.as_deref()
    }

    pub fn headers(&self) -> &Headers {
        &self.config.headers
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `base_url + endpoint` when a non-empty base URL is set, else `endpoint`.
    pub fn url_for(&self, endpoint: &str) -> String {
        match self.base_url() {
            Some(base) if !base.is_empty() => format!("{base}{endpoint}"),
            _ => endpoint.to_string(),
        }
    }

    pub fn build_get(&self, endpoint: &str, params: Option<&Params>) -> HttpRequest {
        self.build(HttpMethod::Get, endpoint, params.cloned().unwrap_or_default(), RequestBody::Empty)
    }

    pub fn build_post(&self, endpoint: &str, body: RequestBody) -> HttpRequest {
        self.build(HttpMethod::Post, endpoint, Params::new(), body)
    }

    pub fn build_put(&self, endpoint: &str, body: RequestBody) -> HttpRequest {
        self.build(HttpMethod::Put, endpoint, Params::new(), body)
    }

    pub fn build_delete(&self, endpoint: &str, params: Option<&Params>) -> HttpRequest {
        self.build(HttpMethod::Delete, endpoint, params.cloned().unwrap_or_default(), RequestBody::Empty)
    }

    pub fn get(&self, endpoint: &str, params: Option<&Params>) -> Result<HttpResponse, TransportError> {
        self.dispatch(self.build_get(endpoint, params))
    }

    pub fn post(&self, endpoint: &str, body: RequestBody) -> Result<HttpResponse, TransportError> {
        self.dispatch(self.build_post(endpoint, body))
    }

    pub fn put(&self, endpoint: &str, body: RequestBody) -> Result<HttpResponse, TransportError> {
        self.dispatch(self.build_put(endpoint, body))
    }

    pub fn delete(&self, endpoint: &str, params: Option<&Params>) -> Result<HttpResponse, TransportError> {
        self.dispatch(self.build_delete(endpoint, params))
    }

    fn build(&self, method: HttpMethod, endpoint: &str, query: Params, body: RequestBody) -> HttpRequest {
        HttpRequest {
            method,
            url: self.url_for(endpoint),
            query,
            headers: self.config.headers.clone(),
            body,
        }
    }

    fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %request.method, url = %request.url, "dispatching request");
        self.transport.execute(&request)
    }
}
