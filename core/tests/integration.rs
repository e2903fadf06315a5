//! End-to-end runs against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the request issuer
//! and input adapter over real HTTP through a `ureq`-backed transport.
//! Relative URLs are resolved against the server the way a page resolves
//! them against its origin.

use std::future::Future;

use xhr_core::{
    HttpRequest, HttpResponse, InputAdapter, MemorySink, Payload, RequestError, RequestIssuer,
    Resolved, Transport, TransportError,
};

struct UreqTransport {
    origin: String,
}

impl Transport for UreqTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let origin = self.origin.clone();
        async move {
            tokio::task::spawn_blocking(move || execute(&origin, request))
                .await
                .map_err(|e| TransportError::new(e.to_string()))?
        }
    }
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// 4xx/5xx come back as data so status interpretation stays in the core.
fn execute(origin: &str, req: HttpRequest) -> Result<HttpResponse, TransportError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .allow_non_standard_methods(true)
        .build()
        .new_agent();

    let url = format!("{origin}{}", req.url.as_deref().unwrap_or("/"));
    let mut builder = ureq::http::Request::builder()
        .method(req.method.as_str())
        .uri(&url);
    for (key, value) in &req.headers {
        builder = builder.header(key, value);
    }
    let result = match req.body() {
        Some(body) => agent.run(
            builder
                .body(body)
                .map_err(|e| TransportError::new(e.to_string()))?,
        ),
        None => agent.run(
            builder
                .body(())
                .map_err(|e| TransportError::new(e.to_string()))?,
        ),
    };
    let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| TransportError::new(e.to_string()))?;
    Ok(HttpResponse::new(status, body))
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Answers one request with a status line and a body shorter than its
/// declared length, then hangs up.
fn truncating_origin() -> String {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut seen = Vec::new();
        let mut buf = [0u8; 1024];
        while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            seen.extend_from_slice(&buf[..n]);
        }
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 64\r\n\r\nshort")
            .unwrap();
    });
    format!("http://{addr}")
}

/// A port nothing listens on.
fn closed_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread")]
async fn live_status_mapping() {
    let issuer = RequestIssuer::new(UreqTransport {
        origin: start_server(),
    });

    // Step 1: 2xx resolves to a summary.
    let resolved = issuer.issue("get", "/comments/12", None).await.unwrap();
    match resolved {
        Resolved::Summary(summary) => {
            assert_eq!(summary.request_url.as_deref(), Some("/comments/12"));
            assert_eq!(summary.request_method, "GET");
            assert_eq!(summary.status_code, 200);
            assert!(summary.request_payload.is_none());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    // Step 2: 404 from a real route.
    let err = issuer.issue("get", "/comments/99", None).await.unwrap_err();
    assert_eq!(err.to_string(), "404 NOT FOUND");

    // Step 3: 5xx.
    let err = issuer.issue("delete", "/status/503", None).await.unwrap_err();
    assert!(matches!(err, RequestError::Status(503)));

    // Step 4: 3xx without a Location passes through with its (empty) body.
    let resolved = issuer.issue("get", "/status/304", None).await.unwrap();
    assert_eq!(resolved, Resolved::PassThrough("304".to_string()));

    // Step 5: a JSON payload is created server-side and echoed back.
    let payload = Payload::Json(serde_json::json!({"comment": "Second"}));
    let resolved = issuer
        .issue("post", "/comments", Some(payload.clone()))
        .await
        .unwrap();
    match resolved {
        Resolved::Summary(summary) => {
            assert_eq!(summary.status_code, 201);
            assert_eq!(summary.request_payload, Some(payload));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    let resolved = issuer.issue("get", "/comments/13", None).await.unwrap();
    assert!(matches!(resolved, Resolved::Summary(s) if s.status_code == 200));
}

#[tokio::test(flavor = "multi_thread")]
async fn live_adapter_renders_every_outcome() {
    let adapter = InputAdapter::new(
        UreqTransport {
            origin: start_server(),
        },
        MemorySink::new(),
    );

    adapter
        .handle_input(r#"query*/echo*{"x":"1","y":"a b"}"#)
        .await
        .unwrap();
    adapter.handle_input("post*/echo*a*b").await.unwrap();
    adapter.handle_input("smth*/echo").await.unwrap();
    adapter.handle_input("trace*/status/404").await.unwrap();

    assert_eq!(
        adapter.sink().history(),
        vec![
            r#"{"RequestURL":"/echo?x=1&y=a%20b","RequestMethod":"GET","StatusCode":200}"#,
            r#"{"RequestURL":"/echo","RequestMethod":"POST","StatusCode":200,"RequestPayload":"a*b"}"#,
            r#"{"RequestURL":"/echo","RequestMethod":"SMTH","StatusCode":200}"#,
            "404 NOT FOUND",
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_a_transport_failure() {
    let issuer = RequestIssuer::new(UreqTransport {
        origin: closed_origin(),
    });
    let err = issuer.issue("get", "/anything", None).await.unwrap_err();
    assert!(matches!(err, RequestError::Transport(_)));
    assert_eq!(
        err.to_string(),
        "Failed during fetching data from Api (View console for details..)"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn truncated_body_is_a_transport_failure() {
    let issuer = RequestIssuer::new(UreqTransport {
        origin: truncating_origin(),
    });

    // The status line arrived as 200, but the body never completed.
    let err = issuer.issue("get", "/comments/12", None).await.unwrap_err();
    assert!(matches!(err, RequestError::Transport(_)));
    assert_eq!(
        err.to_string(),
        "Failed during fetching data from Api (View console for details..)"
    );
}
