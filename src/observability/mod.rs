//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → diagnostics.rs (failures hidden from clients)
//!
//! Consumers:
//!     → Log aggregation (stdout, plain or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows into every dispatch log line
//! - Metrics are cheap (atomic increments); no-ops without a recorder

pub mod diagnostics;
pub mod logging;
pub mod metrics;

pub use diagnostics::TracingSink;
