//! Parser for the one-line command a user types: `method*target*payload`.
//!
//! # Design
//! The line is split on the first two `*` characters into three positional
//! segments. A first segment of `query` (any case) selects the query form,
//! whose third segment is a JSON object of parameters. Anything else is a
//! plain request: the first segment is the method, the second the URL and
//! the remainder the payload text, `*` included.

use serde_json::{Map, Value};

use crate::error::CommandError;
use crate::query::query_stringified;

const QUERY_VERB: &str = "query";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Issue `method` against `target`. Empty segments are kept empty; the
    /// request issuer decides what they mean.
    Request {
        method: String,
        target: String,
        payload: Option<String>,
    },
    /// Issue a GET against `target` with `params` appended as a query string.
    Query {
        target: String,
        params: Map<String, Value>,
    },
}

impl Command {
    pub fn parse(raw: &str) -> Result<Self, CommandError> {
        let mut segments = raw.splitn(3, '*');
        let head = segments.next().unwrap_or_default();
        let target = segments.next();
        let rest = segments.next();

        if head.eq_ignore_ascii_case(QUERY_VERB) {
            let target = target.ok_or(CommandError::MissingTarget)?;
            let json = rest.ok_or(CommandError::MissingQuery)?;
            let params = match serde_json::from_str::<Value>(json)? {
                Value::Object(map) => map,
                Value::Null => Map::new(),
                other => return Err(CommandError::QueryNotObject(kind(&other))),
            };
            return Ok(Command::Query {
                target: target.to_string(),
                params,
            });
        }

        Ok(Command::Request {
            method: head.to_uppercase(),
            target: target.unwrap_or_default().to_string(),
            payload: rest.map(str::to_string),
        })
    }

    /// Method that will go on the wire.
    pub fn method(&self) -> &str {
        match self {
            Command::Request { method, .. } => method,
            Command::Query { .. } => "GET",
        }
    }

    /// URL that will go on the wire, query string included.
    pub fn url(&self) -> String {
        match self {
            Command::Request { target, .. } => target.clone(),
            Command::Query { target, params } => query_stringified(target, params),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
