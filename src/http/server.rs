//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gateway as the only handler
//! - Wire up middleware (request ID, tracing)
//! - Build the per-request execution context
//! - Bind server to listener, plain or TLS
//! - Drain in-flight requests on shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::Response,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::{DefaultOnFailure, TraceLayer};
use tracing::Level;

use crate::assets::StaticAssets;
use crate::config::GatewayConfig;
use crate::gateway::{Bindings, DispatchError, EdgeGateway, ExecutionContext};
use crate::http::request::{request_id_layer, RequestIdExt};
use crate::lifecycle::shutdown::wait as wait_for_shutdown;
use crate::net::tls::load_tls_config;
use crate::observability::{metrics, TracingSink};
use crate::routing::RouteClass;
use crate::upstream::UpstreamApplication;

/// Grace period for in-flight requests on TLS listeners.
const TLS_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for server startup and serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sub-application setup failed: {0}")]
    Upstream(#[from] DispatchError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<EdgeGateway>,
}

/// HTTP server for the edge gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server around an already assembled gateway.
    pub fn new(config: GatewayConfig, gateway: EdgeGateway) -> Self {
        let router = Self::build_router(Arc::new(gateway));
        Self { router, config }
    }

    /// Assemble the production collaborators described by `config`.
    pub fn from_config(config: GatewayConfig) -> Result<Self, ServerError> {
        let assets = Arc::new(StaticAssets::new(&config.assets));
        let application = Arc::new(UpstreamApplication::new(&config.api)?);
        let bindings = Bindings::from(config.bindings.clone());

        tracing::info!(
            upstream = %config.api.upstream,
            bindings = bindings.len(),
            "Sub-application configured"
        );

        let gateway = EdgeGateway::new(assets, application, Arc::new(TracingSink), bindings);
        Ok(Self::new(config, gateway))
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(gateway: Arc<EdgeGateway>) -> Router {
        Router::new()
            .fallback(gateway_handler)
            .with_state(AppState { gateway })
            // 5xx responses are reported by the diagnostic sink or belong to
            // the sub-application; keep them out of the error stream.
            .layer(
                TraceLayer::new_for_http()
                    .on_failure(DefaultOnFailure::new().level(Level::DEBUG)),
            )
            .layer(request_id_layer())
    }

    /// Bind the configured address and serve until shutdown.
    pub async fn serve(self, shutdown: broadcast::Receiver<()>) -> Result<(), ServerError> {
        let addr: SocketAddr = self
            .config
            .listener
            .bind_address
            .parse()
            .map_err(|_| ServerError::BindAddress(self.config.listener.bind_address.clone()))?;

        match self.config.listener.tls.clone() {
            Some(tls) => {
                let rustls = load_tls_config(&tls).await?;
                self.run_tls(addr, rustls, shutdown).await
            }
            None => {
                let listener = TcpListener::bind(addr).await?;
                self.run(listener, shutdown).await
            }
        }
    }

    /// Serve plain HTTP on the given listener until shutdown.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` until shutdown.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            wait_for_shutdown(shutdown).await;
            drain.graceful_shutdown(Some(TLS_DRAIN_TIMEOUT));
        });

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(app)
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Sole handler: every request goes through the gateway.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let route = RouteClass::of(request.uri().path());

    let mut ctx = ExecutionContext::new();
    if let Some(id) = request.request_id() {
        ctx = ctx.with_request_id(id);
    }
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        ctx = ctx.with_client_addr(*addr);
    }

    let response = state.gateway.handle(request, &ctx).await;

    metrics::record_request(route.as_str(), response.status().as_u16(), start);
    tracing::debug!(
        request_id = %ctx.request_id(),
        route = %route,
        status = %response.status(),
        elapsed_ms = ctx.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}
