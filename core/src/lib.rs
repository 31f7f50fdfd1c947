//! Thin synchronous HTTP facade with a base URL, default headers and bearer
//! auth.
//!
//! # Overview
//! `HttpHelper` composes requests from its configuration and hands them to a
//! `Transport` for execution. The default transport is a blocking
//! `ureq::Agent`; any other implementation can be plugged in.
//!
//! # Design
//! - URLs are `base_url + endpoint`, plain concatenation, nothing normalized.
//! - `set_headers` replaces the header mapping; `set_auth` upserts only the
//!   `Authorization` entry.
//! - Each verb is `build_*` (pure, returns `HttpRequest`) followed by one
//!   transport call. Transport errors are returned as-is and non-2xx
//!   responses are ordinary responses. No retries, caching or streaming.
//! - A request body is `Empty`, `Form` or `Json`, never both form and JSON.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod transport;

pub use client::HttpHelper;
pub use config::ClientConfig;
pub use error::{BodyError, PayloadError, TransportError};
pub use headers::Headers;
pub use http::{FormData, HttpMethod, HttpRequest, HttpResponse, Params, RequestBody};
pub use transport::{Transport, TransportConfig, UreqTransport};
