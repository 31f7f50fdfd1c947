//! Error types for the HTTP helper.
//!
//! # Design
//! `TransportError` is produced by a `Transport` and handed to the caller of
//! a verb method untouched; the facade itself never constructs one. Its
//! variants classify the failure so callers can tell an unreachable host from
//! a timeout without string matching. Non-2xx statuses are not errors at all.
//!
//! `BodyError` and `PayloadError` cover the two places where the crate itself
//! touches a body: reading a response and building a request.

use thiserror::Error;

/// A failure raised while executing a request. No response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The host refused or dropped the connection, or could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("TLS failure: {0}")]
    Tls(String),

    /// The host name did not resolve to any address.
    #[error("DNS resolution failed: {0}")]
    Dns(String),

    /// The composed URL was rejected by the transport.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(String),

    /// Anything the transport could not classify further.
    #[error("transport error: {0}")]
    Other(String),
}

/// Errors returned by `HttpResponse` body accessors.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The body is not valid JSON, or does not match the requested type.
    #[error("response body could not be parsed as JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while assembling a request body.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The value could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Both form data and a JSON body were supplied for the same request.
    #[error("both form data and a JSON body were supplied")]
    Ambiguous,
}
