//! Error types for the request helper.
//!
//! # Design
//! The `Display` form of `RequestError` is exactly what the user sees, so
//! the messages are fixed literals. Transport detail is kept on the
//! `TransportError` for logging but never rendered.

use thiserror::Error;

/// Why one request was rejected.
#[derive(Debug, Error)]
pub enum RequestError {
    /// No HTTP method was given. Raised before any network I/O.
    #[error("Please enter an http method")]
    MissingMethod,

    /// The call could not complete (DNS, refused connection, ...).
    #[error("Failed during fetching data from Api (View console for details..)")]
    Transport(#[from] TransportError),

    /// The server answered with a status of 400 or above.
    #[error("{0} NOT FOUND")]
    Status(u16),
}

impl RequestError {
    /// Status code carried by the rejection, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status(status) => Some(*status),
            _ => None,
        }
    }
}

/// A transport-level failure. The detail is diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct TransportError {
    pub detail: String,
}

impl TransportError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Errors from parsing a `method*target*payload` command line.
#[derive(Debug, Error)]
pub enum CommandError {
    /// `query` with no base URL segment.
    #[error("query command is missing a target url")]
    MissingTarget,

    /// `query` with no JSON segment.
    #[error("query command is missing its JSON parameters")]
    MissingQuery,

    #[error("query parameters are not valid JSON: {0}")]
    InvalidQuery(#[from] serde_json::Error),

    /// The JSON parsed but is not a flat key/value object.
    #[error("query parameters must be a JSON object, got {0}")]
    QueryNotObject(&'static str),
}
