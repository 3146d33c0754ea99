//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Asset response:
//!     → headers.rs (content type check)
//!     → HTML? rebuild with Content-Security-Policy : pass through
//!
//! Request forwarded to the sub-application:
//!     → headers.rs (strip hop-by-hop, add X-Forwarded-For)
//! ```
//!
//! # Design Decisions
//! - Policy value is a compile-time constant
//! - Responses are rebuilt, never mutated behind the collaborator's back

pub mod headers;

pub use headers::{apply_content_security_policy, is_html, rewrite, CONTENT_SECURITY_POLICY};
