//! Query-string construction for the `query` verb.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Value};

/// Characters left unescaped by browser URI-component encoding.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Append `params` to `url` as `?k=v&k=v`, encoding each key and value on
/// its own. Pairs keep the map's insertion order. An empty map returns `url`
/// unchanged.
pub fn query_stringified(url: &str, params: &Map<String, Value>) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let pairs: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(&coerce(value))))
        .collect();
    format!("{url}?{}", pairs.join("&"))
}

fn encode(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}

/// String form of a JSON value, the way a page script would stringify it.
fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => coerce_number(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                // Nested nulls vanish when an array is joined.
                Value::Null => String::new(),
                other => coerce(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Integers above this lose precision as a double.
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Shortest round-trip digits, laid out the way a page script prints a
/// number: plain notation for decimal exponents from -6 to 20,
/// `d.ddde+x` otherwise. Negative zero prints as `0`.
fn coerce_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64().filter(|i| i.unsigned_abs() <= MAX_SAFE_INTEGER) {
        return i.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_string();
    }
    let sign = if f < 0.0 { "-" } else { "" };

    // `{:e}` yields the shortest digits, e.g. `1.5e-7`.
    let sci = format!("{:e}", f.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return f.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return f.to_string();
    };
    let digits = mantissa.replace('.', "");
    let k = digits.len() as i32;
    let point = exp + 1;

    let body = if k <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{exp_sign}{}", exp.abs())
        } else {
            format!("{lead}.{rest}e{exp_sign}{}", exp.abs())
        }
    };
    format!("{sign}{body}")
}
