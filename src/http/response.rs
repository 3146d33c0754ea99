//! Responses produced by the gateway itself.
//!
//! # Responsibilities
//! - Build the fixed response returned when the sub-application fails
//!
//! # Design Decisions
//! - Failure detail never reaches the client
//! - No headers beyond what the HTTP layer adds (content-length)

use axum::body::Body;
use axum::http::{Response, StatusCode};

/// Body of the response substituted for a failed API dispatch.
pub const API_ERROR_BODY: &str = "API Error";

/// `500 Internal Server Error` with body `API Error` and no headers.
pub fn api_error_response() -> Response<Body> {
    let mut response = Response::new(Body::from(API_ERROR_BODY));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}
