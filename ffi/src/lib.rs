//! C-ABI wrapper around `xhr-core`.
//!
//! # Overview
//! Lets a host that owns the network (a browser shim, a C program) reuse the
//! core's normalization: the host asks for a normalized request, performs
//! the call itself, and hands the status and body back to get the string to
//! display.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Building yields an `FfiBuildResult`: a request to execute, or an
//!   immediate rejection (missing method, malformed command) to display.
//! - The C caller owns all returned pointers and must call the matching
//!   `xhr_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use xhr_core::{
    build_request, parse_response, query_stringified, Command, HttpRequest, HttpResponse,
    Payload, TransportError,
};

use types::*;

/// Borrow a C string as UTF-8, lossily. Null reads as `None`.
unsafe fn opt_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

fn build(method: &str, url: &str, payload: Option<Payload>) -> *mut FfiBuildResult {
    match build_request(method, url, payload) {
        Ok(req) => FfiBuildResult::request(req),
        Err(err) => FfiBuildResult::rejection(FfiOutcome::from_core(Err(err), 0)),
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Validate and normalize a request.
///
/// `method` null or empty yields a rejection. `url` and `payload` may be
/// null. When `payload_is_json` is set the payload must be valid JSON and is
/// sent and echoed as a structured value; otherwise it is plain text.
/// The caller must free the result with `xhr_free_build_result`.
#[unsafe(no_mangle)]
pub extern "C" fn xhr_build_request(
    method: *const c_char,
    url: *const c_char,
    payload: *const c_char,
    payload_is_json: bool,
) -> *mut FfiBuildResult {
    catch_unwind(|| {
        let method = unsafe { opt_str(method) }.unwrap_or_default();
        let url = unsafe { opt_str(url) }.unwrap_or_default();
        let payload = match unsafe { opt_str(payload) } {
            None => None,
            Some(text) if payload_is_json => match serde_json::from_str(&text) {
                Ok(value) => Some(Payload::Json(value)),
                Err(e) => {
                    return FfiBuildResult::rejection(FfiOutcome::rejected(
                        FfiErrorCode::InvalidCommand,
                        format!("payload is not valid JSON: {e}"),
                    ))
                }
            },
            Some(text) => Some(Payload::Text(text)),
        };
        build(&method, &url, payload)
    })
    .unwrap_or_else(|_| FfiBuildResult::rejection(FfiOutcome::panic("panic in xhr_build_request")))
}

/// Parse a `method*url*payload` (or `query*url*{json}`) line and normalize
/// the request it describes.
///
/// Malformed `query` lines yield a rejection with `InvalidCommand`.
/// The caller must free the result with `xhr_free_build_result`.
#[unsafe(no_mangle)]
pub extern "C" fn xhr_parse_command(raw: *const c_char) -> *mut FfiBuildResult {
    catch_unwind(|| {
        let Some(raw) = (unsafe { opt_str(raw) }) else {
            return FfiBuildResult::rejection(FfiOutcome::null_arg("raw"));
        };
        let command = match Command::parse(&raw) {
            Ok(command) => command,
            Err(e) => {
                return FfiBuildResult::rejection(FfiOutcome::rejected(
                    FfiErrorCode::InvalidCommand,
                    e.to_string(),
                ))
            }
        };
        let url = command.url();
        let payload = match &command {
            Command::Request { payload, .. } => payload.clone().map(Payload::Text),
            Command::Query { .. } => None,
        };
        build(command.method(), &url, payload)
    })
    .unwrap_or_else(|_| FfiBuildResult::rejection(FfiOutcome::panic("panic in xhr_parse_command")))
}

// ---------------------------------------------------------------------------
// Outcome functions
// ---------------------------------------------------------------------------

/// Map a completed response to an outcome.
///
/// `request` must come from a build function and must not have been freed.
/// The caller must free the result with `xhr_free_outcome`.
#[unsafe(no_mangle)]
pub extern "C" fn xhr_parse_response(
    request: *const FfiHttpRequest,
    response: *const FfiHttpResponse,
) -> *mut FfiOutcome {
    catch_unwind(|| {
        let Some(core) = (unsafe { core_request(request) }) else {
            return FfiOutcome::null_arg("request");
        };
        if response.is_null() {
            return FfiOutcome::null_arg("response");
        }
        let resp = unsafe { &*response };
        let body = unsafe { opt_str(resp.body) }.unwrap_or_default();
        let outcome = parse_response(core, Ok(HttpResponse::new(resp.status, body)));
        FfiOutcome::from_core(outcome, resp.status)
    })
    .unwrap_or_else(|_| FfiOutcome::panic("panic in xhr_parse_response"))
}

/// Report that the host could not complete the call at all.
///
/// `detail` is logged, never displayed; it may be null.
/// The caller must free the result with `xhr_free_outcome`.
#[unsafe(no_mangle)]
pub extern "C" fn xhr_transport_failed(
    request: *const FfiHttpRequest,
    detail: *const c_char,
) -> *mut FfiOutcome {
    catch_unwind(|| {
        let Some(core) = (unsafe { core_request(request) }) else {
            return FfiOutcome::null_arg("request");
        };
        let detail = unsafe { opt_str(detail) }.unwrap_or_default();
        let outcome = parse_response(core, Err(TransportError::new(detail)));
        FfiOutcome::from_core(outcome, 0)
    })
    .unwrap_or_else(|_| FfiOutcome::panic("panic in xhr_transport_failed"))
}

unsafe fn core_request<'a>(request: *const FfiHttpRequest) -> Option<&'a HttpRequest> {
    if request.is_null() {
        return None;
    }
    let request = unsafe { &*request };
    if request.core.is_null() {
        return None;
    }
    Some(unsafe { &*request.core })
}

// ---------------------------------------------------------------------------
// Query strings
// ---------------------------------------------------------------------------

/// Append a JSON object of parameters to `url` as an encoded query string.
///
/// Returns null if either argument is null or `query_json` is not a JSON
/// object. The caller must free the result with `xhr_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn xhr_query_stringified(
    url: *const c_char,
    query_json: *const c_char,
) -> *mut c_char {
    catch_unwind(|| {
        let (Some(url), Some(json)) = (unsafe { opt_str(url) }, unsafe { opt_str(query_json) })
        else {
            return std::ptr::null_mut();
        };
        match serde_json::from_str::<serde_json::Value>(&json) {
            Ok(serde_json::Value::Object(params)) => c_string(query_stringified(&url, &params)),
            _ => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` and everything it owns. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn xhr_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.method);
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for header in headers.iter() {
                free_c_string(header.key);
                free_c_string(header.value);
            }
        }
        if !req.core.is_null() {
            drop(unsafe { Box::from_raw(req.core) });
        }
    });
}

/// Free an `FfiOutcome`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn xhr_free_outcome(outcome: *mut FfiOutcome) {
    if outcome.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let outcome = unsafe { Box::from_raw(outcome) };
        free_c_string(outcome.message);
    });
}

/// Free an `FfiBuildResult` together with its request or rejection.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn xhr_free_build_result(result: *mut FfiBuildResult) {
    if result.is_null() {
        return;
    }
    let result = unsafe { Box::from_raw(result) };
    xhr_free_request(result.request);
    xhr_free_outcome(result.rejection);
}

/// Free a string returned by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn xhr_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}
