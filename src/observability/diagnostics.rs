//! Diagnostic sink backed by `tracing`.

use crate::gateway::DiagnosticSink;
use crate::observability::metrics;

/// Logs failures at error level and counts them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, error: &(dyn std::error::Error + 'static), label: &str) {
        let source = error.source().map(ToString::to_string);
        tracing::error!(label, error = %error, source = ?source, "{label}");
        metrics::record_api_failure(label);
    }
}
