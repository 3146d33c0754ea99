//! Route matching logic.
//!
//! # Responsibilities
//! - Match path prefix (case-sensitive)
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching
//! - The query string never takes part in matching

use axum::body::Body;
use axum::http::Request;

/// Path prefix reserved for sub-application traffic.
pub const API_PREFIX: &str = "/api/";

/// Matches the request path prefix.
#[derive(Debug, Clone, Copy)]
pub struct PathPrefixMatcher {
    prefix: &'static str,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    /// Matcher for the reserved API prefix.
    pub const fn api() -> Self {
        Self::new(API_PREFIX)
    }

    /// Returns true if the path starts with this matcher's prefix.
    pub fn matches_path(&self, path: &str) -> bool {
        path.starts_with(self.prefix)
    }

    /// Returns true if the request's path matches.
    pub fn matches(&self, req: &Request<Body>) -> bool {
        self.matches_path(req.uri().path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::api();

        let req1 = Request::builder()
            .uri("http://example.com/api/v1?x=1")
            .body(Body::default())
            .unwrap();
        assert!(matcher.matches(&req1));

        let req2 = Request::builder()
            .uri("http://example.com/images/api/")
            .body(Body::default())
            .unwrap();
        assert!(!matcher.matches(&req2));

        let req3 = Request::builder()
            .uri("/index.html?next=/api/")
            .body(Body::default())
            .unwrap();
        assert!(!matcher.matches(&req3));
    }
}
