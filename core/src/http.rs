//! HTTP request and response values exchanged with a `Transport`.
//!
//! # Design
//! Requests and responses are plain data. `HttpHelper` builds an
//! `HttpRequest` without touching the network and hands it to a transport,
//! which returns an `HttpResponse` by value. Keeping the request as data makes
//! the facade deterministic: two builds from the same configuration compare
//! equal, and tests can inspect exactly what would be sent.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{BodyError, PayloadError};
use crate::headers::Headers;

/// Query parameters appended to the URL by the transport.
pub type Params = BTreeMap<String, String>;

/// Fields of an `application/x-www-form-urlencoded` body.
pub type FormData = BTreeMap<String, String>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a POST or PUT request.
///
/// Form data and JSON are mutually exclusive; a request carries at most one.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Form(FormData),
    Json(serde_json::Value),
}

impl RequestBody {
    /// Serialize `value` into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, PayloadError> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(PayloadError::Serialize)
    }

    /// Build a body from an optional form and an optional JSON value.
    ///
    /// Supplying both is rejected rather than resolved by precedence.
    pub fn from_parts(
        data: Option<FormData>,
        json: Option<serde_json::Value>,
    ) -> Result<Self, PayloadError> {
        match (data, json) {
            (None, None) => Ok(RequestBody::Empty),
            (Some(form), None) => Ok(RequestBody::Form(form)),
            (None, Some(value)) => Ok(RequestBody::Json(value)),
            (Some(_), Some(_)) => Err(PayloadError::Ambiguous),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }
}

/// A single request, fully composed.
///
/// `query` is only populated for GET and DELETE; `body` is only non-empty for
/// POST and PUT.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Params,
    pub headers: Headers,
    pub body: RequestBody,
}

/// A response returned by a transport. Any status code is a valid response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value whose name matches ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> Result<String, BodyError> {
        Ok(String::from_utf8(self.body.clone())?)
    }

    /// Parse the body as JSON into `T` (use `serde_json::Value` for an
    /// untyped view).
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BodyError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
