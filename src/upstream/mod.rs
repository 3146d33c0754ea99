//! Sub-application reached over HTTP.
//!
//! # Data Flow
//! ```text
//! /api/* request + Bindings + ExecutionContext
//!     → client.rs (rewrite URI onto upstream base, adjust headers)
//!     → hyper-util client → upstream application
//!     → response returned verbatim (minus hop-by-hop headers)
//! ```
//!
//! # Design Decisions
//! - Upstream HTTP statuses, 5xx included, are responses, not errors
//! - Only transport failures become `DispatchError`
//! - Bindings travel as `x-gateway-binding-<name>` request headers
//! - No retries and no timeout of its own

pub mod client;

pub use client::{binding_header_name, UpstreamApplication, BINDING_HEADER_PREFIX};
