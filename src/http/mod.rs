//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, request ID, trace span)
//!     → request.rs (request ID lookup)
//!     → gateway (classify, delegate, rewrite)
//!     → response.rs (gateway-generated error response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::{api_error_response, API_ERROR_BODY};
pub use server::{HttpServer, ServerError};
