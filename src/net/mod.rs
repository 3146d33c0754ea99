//! Network layer subsystem.
//!
//! Plain TCP listeners are bound directly by the HTTP server; this module
//! only prepares TLS material for `axum-server`.

pub mod tls;
