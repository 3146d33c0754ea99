//! Per-request execution context and environment bindings.

use std::collections::BTreeMap;
use std::future::Future;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tracing::Instrument;
use uuid::Uuid;

/// Named values exposed to the sub-application on every dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    vars: BTreeMap<String, String>,
}

impl Bindings {
    pub fn new(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl From<BTreeMap<String, String>> for Bindings {
    fn from(vars: BTreeMap<String, String>) -> Self {
        Self::new(vars)
    }
}

/// Data scoped to a single request.
///
/// Built by the HTTP layer before the gateway runs and dropped with the
/// response.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    request_id: String,
    client_addr: Option<SocketAddr>,
    received_at: Instant,
}

impl ExecutionContext {
    /// Create a context with a fresh UUID v4 request ID.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            client_addr: None,
            received_at: Instant::now(),
        }
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = id.into();
        self
    }

    pub fn with_client_addr(mut self, addr: SocketAddr) -> Self {
        self.client_addr = Some(addr);
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn client_addr(&self) -> Option<SocketAddr> {
        self.client_addr
    }

    /// Time since the request was received.
    pub fn elapsed(&self) -> Duration {
        self.received_at.elapsed()
    }

    /// Run work in the background without holding up the response.
    ///
    /// Hook for in-process [`SubApplication`](crate::gateway::SubApplication)
    /// implementations; the HTTP upstream has no deferred work.
    ///
    /// Must be called from within a Tokio runtime. The task outlives the
    /// request and is not cancelled when the client disconnects.
    pub fn wait_until<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let span = tracing::debug_span!("wait_until", request_id = %self.request_id);
        tokio::spawn(work.instrument(span));
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}
