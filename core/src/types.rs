//! Values that flow through a single request: the caller's payload and the
//! normalized result of the call.
//!
//! # Design
//! `ResponseSummary` serializes with the exact key names a page renders
//! (`RequestURL`, `RequestMethod`, `StatusCode`, `RequestPayload`), so the
//! display string of a success is its compact JSON form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::http::{JSON_CONTENT_TYPE, TEXT_CONTENT_TYPE};

/// A request payload, either the raw text a user typed or a structured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Json(serde_json::Value),
}

impl Payload {
    /// Wire form of the payload.
    pub fn to_body(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Json(value) => value.to_string(),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Payload::Text(_) => TEXT_CONTENT_TYPE,
            Payload::Json(_) => JSON_CONTENT_TYPE,
        }
    }

    /// An empty string carries nothing and is sent as no body at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Text(text) if text.is_empty())
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

/// What a 2xx response resolves to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSummary {
    #[serde(rename = "RequestURL", skip_serializing_if = "Option::is_none")]
    pub request_url: Option<String>,
    #[serde(rename = "RequestMethod")]
    pub request_method: String,
    #[serde(rename = "StatusCode")]
    pub status_code: u16,
    #[serde(rename = "RequestPayload", skip_serializing_if = "Option::is_none")]
    pub request_payload: Option<Payload>,
}

/// A resolved (non-error) result of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// Status in `[200, 300)`.
    Summary(ResponseSummary),
    /// Status below 200 or in `[300, 400)`: the status immediately followed
    /// by the raw response body.
    PassThrough(String),
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Summary(summary) => {
                let json = serde_json::to_string(summary).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            Resolved::PassThrough(text) => f.write_str(text),
        }
    }
}

/// The normalized outcome of one request.
pub type Outcome = Result<Resolved, RequestError>;

/// String handed to a display sink for either branch of an outcome.
pub fn display_string(outcome: &Outcome) -> String {
    match outcome {
        Ok(resolved) => resolved.to_string(),
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_serializes_with_page_keys() {
        let summary = ResponseSummary {
            request_url: Some("abc".to_string()),
            request_method: "GET".to_string(),
            status_code: 200,
            request_payload: None,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({"RequestURL": "abc", "RequestMethod": "GET", "StatusCode": 200})
        );
    }

    #[test]
    fn summary_includes_payload_as_supplied() {
        let summary = ResponseSummary {
            request_url: Some("abc".to_string()),
            request_method: "HEAD".to_string(),
            status_code: 200,
            request_payload: Some(Payload::from("blabla")),
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["RequestPayload"], "blabla");

        let summary = ResponseSummary {
            request_payload: Some(Payload::Json(json!({"a": 1}))),
            ..summary
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["RequestPayload"], json!({"a": 1}));
    }

    #[test]
    fn missing_url_is_left_out() {
        let summary = ResponseSummary {
            request_url: None,
            request_method: "POST".to_string(),
            status_code: 201,
            request_payload: None,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("RequestURL").is_none());
        assert_eq!(value, serde_json::json!({"RequestMethod": "POST", "StatusCode": 201}));
    }

    #[test]
    fn display_string_covers_both_branches() {
        let ok: Outcome = Ok(Resolved::PassThrough("301moved".to_string()));
        assert_eq!(display_string(&ok), "301moved");

        let err: Outcome = Err(RequestError::Status(404));
        assert_eq!(display_string(&err), "404 NOT FOUND");
    }

    #[test]
    fn empty_text_payload_is_empty() {
        assert!(Payload::from("").is_empty());
        assert!(!Payload::from("x").is_empty());
        assert!(!Payload::Json(json!("")).is_empty());
    }
}
