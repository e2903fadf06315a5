//! `ureq`-backed transport for the terminal host.
//!
//! # Design
//! `ureq` is blocking, so each call runs on tokio's blocking pool and the
//! returned future stays `Send`. URLs resolve against the configured origin
//! the way a page resolves them against its own location. 4xx/5xx answers
//! come back as data; only a failed round-trip is an `Err`.

use std::future::Future;

use tracing::debug;
use url::Url;
use xhr_core::{HttpRequest, HttpResponse, Transport, TransportError};

#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    origin: Option<Url>,
}

impl UreqTransport {
    pub fn new(origin: Option<Url>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .build()
            .new_agent();
        Self { agent, origin }
    }

    /// Absolute URL for a request target.
    ///
    /// Absolute targets are used as given. Relative targets join the origin.
    /// A missing target means the origin itself.
    pub fn resolve(&self, target: Option<&str>) -> Result<Url, TransportError> {
        match (target, &self.origin) {
            (Some(t), origin) => match Url::parse(t) {
                Ok(url) => Ok(url),
                Err(url::ParseError::RelativeUrlWithoutBase) => match origin {
                    Some(base) => base
                        .join(t)
                        .map_err(|e| TransportError::new(format!("cannot resolve {t:?}: {e}"))),
                    None => Err(TransportError::new(format!(
                        "relative url {t:?} and no origin configured"
                    ))),
                },
                Err(e) => Err(TransportError::new(format!("invalid url {t:?}: {e}"))),
            },
            (None, Some(base)) => Ok(base.clone()),
            (None, None) => Err(TransportError::new("no url given and no origin configured")),
        }
    }
}

impl Transport for UreqTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let agent = self.agent.clone();
        let target = self.resolve(request.url.as_deref());
        async move {
            let target = target?;
            tokio::task::spawn_blocking(move || execute(&agent, &target, request))
                .await
                .map_err(|e| TransportError::new(e.to_string()))?
        }
    }
}

fn execute(
    agent: &ureq::Agent,
    target: &Url,
    req: HttpRequest,
) -> Result<HttpResponse, TransportError> {
    let mut builder = ureq::http::Request::builder()
        .method(req.method.as_str())
        .uri(target.as_str());

    let mut body = req.body();
    if body.is_some() && matches!(req.method.as_str(), "GET" | "HEAD") {
        // Browsers never send a body with these methods either.
        debug!(method = %req.method, "dropping request body");
        body = None;
    }
    if body.is_some() {
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
    }

    let result = match body {
        Some(body) => agent.run(builder.body(body).map_err(to_transport)?),
        None => agent.run(builder.body(()).map_err(to_transport)?),
    };
    let mut response = result.map_err(to_transport)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
        .collect();
    let body = response.body_mut().read_to_string().map_err(to_transport)?;
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn to_transport(e: impl std::fmt::Display) -> TransportError {
    TransportError::new(e.to_string())
}
