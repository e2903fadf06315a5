//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use xhr_core::{display_string, HttpRequest, Outcome, RequestError};

/// Build a C string, replacing interior NULs so conversion cannot fail.
pub(crate) fn c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "\u{FFFD}") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A normalized request the C host is expected to execute.
///
/// `url` and `body` are null when absent. `core` is an opaque handle the
/// host passes back untouched to `xhr_parse_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: *mut c_char,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
    pub core: *mut HttpRequest,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let method = c_string(req.method.clone());
        let url = match &req.url {
            Some(u) => c_string(u.clone()),
            None => std::ptr::null_mut(),
        };
        let body = match req.body() {
            Some(b) => c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k.clone()),
                    value: c_string(v.clone()),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method,
            url,
            headers,
            headers_len,
            body,
            core: Box::into_raw(Box::new(req)),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// A completed HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing a request and passes a
/// pointer to `xhr_parse_response`. The FFI layer reads but does not free
/// these fields. A null `body` reads as empty.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Which branch of the outcome the host should treat this as.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiOutcomeKind {
    Resolved = 0,
    Rejected = 1,
}

/// Why an outcome was rejected.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    MissingMethod = 1,
    Transport = 2,
    Status = 3,
    InvalidCommand = 4,
    Panic = 5,
    NullArg = 6,
}

/// A normalized outcome. `message` is the exact string to display for
/// either branch. `http_status` is 0 when no response was received.
#[repr(C)]
pub struct FfiOutcome {
    pub kind: FfiOutcomeKind,
    pub error_code: FfiErrorCode,
    pub http_status: u16,
    pub message: *mut c_char,
}

impl FfiOutcome {
    pub(crate) fn from_core(outcome: Outcome, http_status: u16) -> *mut Self {
        let message = c_string(display_string(&outcome));
        let (kind, error_code) = match &outcome {
            Ok(_) => (FfiOutcomeKind::Resolved, FfiErrorCode::Ok),
            Err(err) => (FfiOutcomeKind::Rejected, error_code(err)),
        };
        Box::into_raw(Box::new(FfiOutcome {
            kind,
            error_code,
            http_status,
            message,
        }))
    }

    /// A rejection produced by this layer rather than by the core.
    pub(crate) fn rejected(error_code: FfiErrorCode, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiOutcome {
            kind: FfiOutcomeKind::Rejected,
            error_code,
            http_status: 0,
            message: c_string(msg),
        }))
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::rejected(FfiErrorCode::NullArg, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::rejected(FfiErrorCode::Panic, msg.to_string())
    }
}

fn error_code(err: &RequestError) -> FfiErrorCode {
    match err {
        RequestError::MissingMethod => FfiErrorCode::MissingMethod,
        RequestError::Transport(_) => FfiErrorCode::Transport,
        RequestError::Status(_) => FfiErrorCode::Status,
    }
}

/// Result of building a request: exactly one of `request` and `rejection`
/// is non-null.
#[repr(C)]
pub struct FfiBuildResult {
    pub request: *mut FfiHttpRequest,
    pub rejection: *mut FfiOutcome,
}

impl FfiBuildResult {
    pub(crate) fn request(req: HttpRequest) -> *mut Self {
        Box::into_raw(Box::new(FfiBuildResult {
            request: FfiHttpRequest::from_core(req),
            rejection: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn rejection(outcome: *mut FfiOutcome) -> *mut Self {
        Box::into_raw(Box::new(FfiBuildResult {
            request: std::ptr::null_mut(),
            rejection: outcome,
        }))
    }
}
