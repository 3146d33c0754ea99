//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → matcher.rs (path prefix check)
//!     → Return: RouteClass::Api or RouteClass::Asset
//! ```
//!
//! # Design Decisions
//! - Exactly two destinations, fixed at compile time
//! - Prefix matching only, case-sensitive
//! - Deterministic: same path always yields same class

pub mod matcher;

pub use matcher::{PathPrefixMatcher, API_PREFIX};

/// Where a request is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    /// Handled by the sub-application.
    Api,
    /// Served from the static asset store.
    Asset,
}

impl RouteClass {
    /// Classify a URL path.
    pub fn of(path: &str) -> Self {
        if PathPrefixMatcher::api().matches_path(path) {
            RouteClass::Api
        } else {
            RouteClass::Asset
        }
    }

    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteClass::Api => "api",
            RouteClass::Asset => "asset",
        }
    }
}

impl std::fmt::Display for RouteClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
