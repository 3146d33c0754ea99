//! Static asset store.
//!
//! # Data Flow
//! ```text
//! non-API request
//!     → static_files.rs (ServeDir lookup under assets.root)
//!     → file found: 200/206/304 with extension-derived content type
//!     → otherwise: not-found page (404) or empty 404
//! ```

pub mod static_files;

pub use static_files::StaticAssets;
