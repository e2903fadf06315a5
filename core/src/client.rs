//! Request issuer: validates and normalizes a request, runs it through a
//! `Transport`, and maps the completion to an `Outcome`.
//!
//! # Design
//! The work is split the same way a host-does-IO client is: `build_request`
//! produces plain data, the transport performs the single round-trip, and
//! `parse_response` consumes the result. `RequestIssuer::issue` is the three
//! steps glued together for callers that own a transport.
//!
//! Status mapping:
//! - `[200, 300)` resolves to a `ResponseSummary`.
//! - `>= 400` rejects with `"<status> NOT FOUND"`.
//! - anything else (1xx, 3xx) resolves to `"<status><body>"`.

use tracing::{debug, error};

use crate::error::{RequestError, TransportError};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Outcome, Payload, Resolved, ResponseSummary};

/// Validate and normalize one request.
///
/// An empty `method` is rejected before anything else happens. An empty
/// `url` becomes `None`. An empty text payload is dropped.
pub fn build_request(
    method: &str,
    url: &str,
    payload: Option<Payload>,
) -> Result<HttpRequest, RequestError> {
    if method.is_empty() {
        return Err(RequestError::MissingMethod);
    }
    let payload = payload.filter(|p| !p.is_empty());
    let headers = match &payload {
        Some(p) => vec![("content-type".to_string(), p.content_type().to_string())],
        None => Vec::new(),
    };
    Ok(HttpRequest {
        method: method.to_uppercase(),
        url: (!url.is_empty()).then(|| url.to_string()),
        headers,
        payload,
    })
}

/// Map a completed (or failed) round-trip to an outcome.
pub fn parse_response(
    request: &HttpRequest,
    response: Result<HttpResponse, TransportError>,
) -> Outcome {
    let response = match response {
        Ok(response) => response,
        Err(err) => {
            error!(
                method = %request.method,
                url = request.url.as_deref().unwrap_or_default(),
                detail = %err.detail,
                "transport failure"
            );
            return Err(err.into());
        }
    };

    let status = response.status;
    debug!(method = %request.method, status, "request completed");
    match status {
        200..=299 => Ok(Resolved::Summary(ResponseSummary {
            request_url: request.url.clone(),
            request_method: request.method.clone(),
            status_code: status,
            request_payload: request.payload.clone(),
        })),
        400.. => Err(RequestError::Status(status)),
        _ => Ok(Resolved::PassThrough(format!("{status}{}", response.body))),
    }
}

/// Issues requests through a transport, one round-trip per call.
#[derive(Debug, Clone)]
pub struct RequestIssuer<T> {
    transport: T,
}

impl<T: Transport> RequestIssuer<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn issue(&self, method: &str, url: &str, payload: Option<Payload>) -> Outcome {
        let request = build_request(method, url, payload)?;
        debug!(
            method = %request.method,
            url = request.url.as_deref().unwrap_or_default(),
            has_body = request.payload.is_some(),
            "issuing request"
        );
        let response = self.transport.send(request.clone()).await;
        parse_response(&request, response)
    }
}
