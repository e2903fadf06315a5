//! Browser-style HTTP request helper core.
//!
//! # Overview
//! Takes a one-line command (`method*url*payload`, or
//! `query*url*{json}`), issues a single HTTP request through a pluggable
//! `Transport`, and normalizes the completion into an `Outcome` that a
//! `DisplaySink` renders as text.
//!
//! # Design
//! - The core never touches the network itself (host-does-IO pattern):
//!   `build_request` produces plain data, a `Transport` performs the call,
//!   `parse_response` maps the status to an outcome.
//! - Errors render as fixed user-facing messages; transport detail is only
//!   logged through `tracing`.
//! - Requests share no state, so any number may be in flight at once.

pub mod adapter;
pub mod client;
pub mod command;
pub mod display;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

pub use adapter::{InputAdapter, InputEvent, ENTER_KEY_CODE};
pub use client::{build_request, parse_response, RequestIssuer};
pub use command::Command;
pub use display::{DisplaySink, MemorySink};
pub use error::{CommandError, RequestError, TransportError};
pub use http::{HttpRequest, HttpResponse, Transport};
pub use query::query_stringified;
pub use types::{display_string, Outcome, Payload, Resolved, ResponseSummary};
