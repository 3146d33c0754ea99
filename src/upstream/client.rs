//! HTTP client forwarding API traffic to the upstream application.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{header, HeaderName, HeaderValue, Request, Response, Uri, Version};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::ApiConfig;
use crate::gateway::{Bindings, DispatchError, ExecutionContext, SubApplication};
use crate::http::request::X_REQUEST_ID;
use crate::security::headers::{append_forwarded_for, strip_hop_by_hop};

/// Prefix of the request headers carrying environment bindings.
pub const BINDING_HEADER_PREFIX: &str = "x-gateway-binding-";

/// Header name under which a binding is forwarded.
pub fn binding_header_name(name: &str) -> String {
    format!("{BINDING_HEADER_PREFIX}{}", name.to_ascii_lowercase())
}

/// Sub-application living behind an HTTP base URL.
#[derive(Debug, Clone)]
pub struct UpstreamApplication {
    client: Client<HttpConnector, Body>,
    scheme: Scheme,
    authority: Authority,
    base_path: String,
    preserve_host: bool,
}

impl UpstreamApplication {
    /// Build a client for `config.upstream`.
    ///
    /// # Errors
    /// Returns [`DispatchError::InvalidUri`] if the base URL lacks a scheme or authority.
    pub fn new(config: &ApiConfig) -> Result<Self, DispatchError> {
        let base = config
            .upstream
            .parse::<Uri>()
            .map_err(|e| DispatchError::InvalidUri(format!("{}: {e}", config.upstream)))?;
        let parts = base.into_parts();

        let scheme = parts
            .scheme
            .ok_or_else(|| DispatchError::InvalidUri(format!("{}: missing scheme", config.upstream)))?;
        let authority = parts
            .authority
            .ok_or_else(|| DispatchError::InvalidUri(format!("{}: missing authority", config.upstream)))?;
        let base_path = parts
            .path_and_query
            .map(|pq| pq.path().trim_end_matches('/').to_string())
            .unwrap_or_default();

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            client,
            scheme,
            authority,
            base_path,
            preserve_host: config.preserve_host,
        })
    }

    /// Map an incoming request URI onto the upstream, keeping path and query.
    pub fn upstream_uri(&self, original: &Uri) -> Result<Uri, DispatchError> {
        let path_and_query = original
            .path_and_query()
            .map(PathAndQuery::as_str)
            .unwrap_or("/");

        Ok(Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(format!("{}{}", self.base_path, path_and_query))
            .build()?)
    }
}

#[async_trait]
impl SubApplication for UpstreamApplication {
    async fn dispatch(
        &self,
        request: Request<Body>,
        bindings: &Bindings,
        ctx: &ExecutionContext,
    ) -> Result<Response<Body>, DispatchError> {
        let (mut parts, body) = request.into_parts();
        parts.uri = self.upstream_uri(&parts.uri)?;
        parts.version = Version::HTTP_11;

        let headers = &mut parts.headers;
        strip_hop_by_hop(headers);
        if !self.preserve_host {
            headers.remove(header::HOST);
        }

        // Clients must not be able to spoof bindings.
        let spoofed: Vec<HeaderName> = headers
            .keys()
            .filter(|name| name.as_str().starts_with(BINDING_HEADER_PREFIX))
            .cloned()
            .collect();
        for name in spoofed {
            headers.remove(name);
        }

        for (name, value) in bindings.iter() {
            match (
                HeaderName::from_bytes(binding_header_name(name).as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(binding = %name, "Binding is not a valid header, skipped"),
            }
        }

        if let Ok(id) = HeaderValue::from_str(ctx.request_id()) {
            headers.insert(X_REQUEST_ID, id);
        }
        if let Some(addr) = ctx.client_addr() {
            append_forwarded_for(headers, addr.ip());
        }

        tracing::debug!(
            request_id = %ctx.request_id(),
            upstream = %parts.uri,
            "Forwarding to upstream application"
        );

        let response: Response<Incoming> = self
            .client
            .request(Request::from_parts(parts, body))
            .await?;

        let (mut parts, body) = response.into_parts();
        strip_hop_by_hop(&mut parts.headers);
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}
