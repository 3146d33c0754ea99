//! Header manipulation and security headers.
//!
//! # Responsibilities
//! - Add the Content-Security-Policy required by the in-browser code editor
//! - Strip hop-by-hop headers
//! - Append X-Forwarded-For
//!
//! # Design Decisions
//! - The policy admits `eval`, inline scripts and blob workers for the editor
//! - Content type detection is a case-insensitive substring match

use std::net::IpAddr;

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Response};

/// Policy attached to every HTML asset response.
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
script-src 'self' 'unsafe-inline' 'unsafe-eval' data: blob:; \
style-src 'self' 'unsafe-inline' data:; \
worker-src 'self' blob:; \
child-src 'self' blob:; \
font-src 'self' data:; \
img-src 'self' data: blob:; \
connect-src 'self' ws: wss: https:";

const HTML_MEDIA_TYPE: &[u8] = b"text/html";

pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Returns true if any `content-type` value mentions `text/html`.
pub fn is_html(headers: &HeaderMap) -> bool {
    headers.get_all(header::CONTENT_TYPE).iter().any(|value| {
        value
            .as_bytes()
            .windows(HTML_MEDIA_TYPE.len())
            .any(|window| window.eq_ignore_ascii_case(HTML_MEDIA_TYPE))
    })
}

/// Rebuild a response with the Content-Security-Policy set.
///
/// Status, reason phrase, version, extensions, every other header and the
/// body stream move into the new response untouched. A previous policy
/// header, if any, is replaced.
pub fn rewrite(response: Response<Body>) -> Response<Body> {
    let (mut parts, body) = response.into_parts();
    parts.headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    Response::from_parts(parts, body)
}

/// Rewrite HTML responses; return anything else as is.
pub fn apply_content_security_policy(response: Response<Body>) -> Response<Body> {
    if is_html(response.headers()) {
        rewrite(response)
    } else {
        response
    }
}

/// Remove hop-by-hop headers, including any named by `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in named.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}

/// Append the client address to X-Forwarded-For.
pub fn append_forwarded_for(headers: &mut HeaderMap, client: IpAddr) {
    let value = match headers.get(&X_FORWARDED_FOR).and_then(|v| v.to_str().ok()) {
        Some(existing) => format!("{existing}, {client}"),
        None => client.to_string(),
    };
    if let Ok(value) = HeaderValue::from_str(&value) {
        headers.insert(X_FORWARDED_FOR, value);
    }
}
