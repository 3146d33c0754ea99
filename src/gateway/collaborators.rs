//! Interfaces of the components the gateway delegates to.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};

use crate::gateway::context::{Bindings, ExecutionContext};

/// Failure raised by a sub-application instead of a response.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// The upstream base URL and request path do not form a valid URI.
    #[error("invalid upstream uri: {0}")]
    InvalidUri(String),

    /// The forwarded request could not be assembled.
    #[error("failed to build upstream request: {0}")]
    Request(#[from] axum::http::Error),

    /// The upstream could not be reached or the exchange broke off.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The application itself reported a failure.
    #[error("application error: {0}")]
    Application(String),
}

/// Static asset store.
///
/// Never fails: missing files and I/O problems come back as HTTP statuses.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Return the best-matching resource for the request, or a not-found response.
    async fn fetch(&self, request: Request<Body>) -> Response<Body>;
}

/// Application handling everything under the API prefix.
#[async_trait]
pub trait SubApplication: Send + Sync {
    /// Handle one request.
    ///
    /// # Errors
    /// Returns [`DispatchError`] when no response can be produced.
    async fn dispatch(
        &self,
        request: Request<Body>,
        bindings: &Bindings,
        ctx: &ExecutionContext,
    ) -> Result<Response<Body>, DispatchError>;
}

/// Out-of-band recorder for failures hidden from clients.
pub trait DiagnosticSink: Send + Sync {
    /// Record an error under a short label. Must not panic.
    fn record(&self, error: &(dyn std::error::Error + 'static), label: &str);
}
