//! Edge gateway.
//!
//! Sits in front of a web application: `/api/` traffic goes to the
//! sub-application, everything else is served from the static asset store,
//! and HTML pages gain the Content-Security-Policy the in-browser code
//! editor needs.
//!
//! ```text
//!     Client ──▶ http::server ──▶ gateway::EdgeGateway
//!                                   │
//!                   ┌───────────────┴───────────────┐
//!                   ▼                               ▼
//!          assets::StaticAssets          upstream::UpstreamApplication
//!          (+ security::headers)          (failure → 500 "API Error",
//!                                          observability::TracingSink)
//! ```

// Core
pub mod gateway;
pub mod routing;
pub mod security;

// Collaborators
pub mod assets;
pub mod upstream;

// Serving runtime
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::GatewayConfig;
pub use gateway::EdgeGateway;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
