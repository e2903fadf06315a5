//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and normalizes `HttpResponse` values; the network call itself is
//! delegated to a `Transport`, which is the only place I/O happens. A browser
//! shim, a C host behind the FFI crate, or the CLI's `ureq` agent can all sit
//! behind that trait.
//!
//! All fields use owned types (`String`, `Vec`) so values can cross FFI and
//! task boundaries without lifetime concerns.

use std::future::Future;

use crate::error::TransportError;
use crate::types::Payload;

/// Content type a browser attaches to a plain string body.
pub const TEXT_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";

/// Content type attached to structured (JSON) payloads.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// An HTTP request described as plain data.
///
/// `method` is already uppercased. `url` is `None` when the caller supplied
/// no URL; resolving that case is left to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: String,
    pub url: Option<String>,
    pub headers: Vec<(String, String)>,
    pub payload: Option<Payload>,
}

impl HttpRequest {
    /// Render the payload as the bytes that go on the wire.
    pub fn body(&self) -> Option<String> {
        self.payload.as_ref().map(Payload::to_body)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Performs exactly one network round-trip per `send`.
///
/// Implementations must not retry and must report "could not reach the
/// server" as `Err`, never as a synthetic status code. Any status the server
/// actually returned, including 4xx/5xx, is `Ok`.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}
