//! Types shared between the upload backend and the integration verifier
//!
//! Holds the JSON wire shapes of the presign API and the storage key rules,
//! so both sides agree on what a valid upload key looks like.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Storage key namespace, filename sanitization and key composition
pub mod key;
/// Request and response bodies of `POST /uploaded`
pub mod upload;

pub use key::{sanitize_filename, StorageKey, DEFAULT_KEY_PREFIX};
pub use upload::{ErrorResponse, PresignResponse, UploadIntent};
