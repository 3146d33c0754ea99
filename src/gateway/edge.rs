//! The per-request dispatch and response rewrite.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};

use crate::gateway::collaborators::{AssetStore, DiagnosticSink, SubApplication};
use crate::gateway::context::{Bindings, ExecutionContext};
use crate::http::response::api_error_response;
use crate::routing::RouteClass;
use crate::security::apply_content_security_policy;

/// Label attached to diagnostics for failed API dispatches.
pub const API_FAILURE_LABEL: &str = "API Error";

/// Stateless request handler in front of the asset store and the sub-application.
#[derive(Clone)]
pub struct EdgeGateway {
    assets: Arc<dyn AssetStore>,
    application: Arc<dyn SubApplication>,
    diagnostics: Arc<dyn DiagnosticSink>,
    bindings: Bindings,
}

impl EdgeGateway {
    pub fn new(
        assets: Arc<dyn AssetStore>,
        application: Arc<dyn SubApplication>,
        diagnostics: Arc<dyn DiagnosticSink>,
        bindings: Bindings,
    ) -> Self {
        Self {
            assets,
            application,
            diagnostics,
            bindings,
        }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Dispatch one request and produce its response.
    ///
    /// Makes exactly one downstream call. Never fails: a sub-application
    /// error is recorded and replaced by `500 API Error`.
    pub async fn handle(&self, request: Request<Body>, ctx: &ExecutionContext) -> Response<Body> {
        let route = RouteClass::of(request.uri().path());

        tracing::debug!(
            request_id = %ctx.request_id(),
            method = %request.method(),
            path = %request.uri().path(),
            route = %route,
            "Dispatching request"
        );

        match route {
            RouteClass::Asset => {
                let response = self.assets.fetch(request).await;
                apply_content_security_policy(response)
            }
            RouteClass::Api => {
                match self.application.dispatch(request, &self.bindings, ctx).await {
                    Ok(response) => response,
                    Err(e) => {
                        self.diagnostics.record(&e, API_FAILURE_LABEL);
                        api_error_response()
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for EdgeGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeGateway")
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}
