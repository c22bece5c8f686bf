//! Presign backend for browser uploads

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Caller identity resolution
pub mod identity;

/// Presigned upload issuance
pub mod presign;

/// HTTP routes
pub mod routes;

/// Server setup
pub mod server;

/// Configuration, errors and extractors
pub mod types;
