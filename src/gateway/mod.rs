//! Edge gateway core.
//!
//! # Data Flow
//! ```text
//! Request + ExecutionContext
//!     → RouteClass::of(path)
//!     ├── Asset → AssetStore::fetch → apply_content_security_policy → Response
//!     └── Api   → SubApplication::dispatch(request, bindings, ctx)
//!                   ├── Ok(response) → Response (verbatim)
//!                   └── Err(e)       → DiagnosticSink::record → 500 "API Error"
//! ```
//!
//! # Design Decisions
//! - Collaborators are trait objects handed in at construction
//! - No state survives a call; `handle` takes `&self`
//! - Every path yields exactly one response

pub mod collaborators;
pub mod context;
pub mod edge;

pub use collaborators::{AssetStore, DiagnosticSink, DispatchError, SubApplication};
pub use context::{Bindings, ExecutionContext};
pub use edge::{EdgeGateway, API_FAILURE_LABEL};
