//! Integration verifier for a deployed upload stack
//!
//! Clears the upload namespace of the test bucket, checks the presign API's
//! HTTP contract and proves a full presign, PUT and read-back round-trip.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Presign API checks
pub mod checks;
/// Namespace cleanup
pub mod cleanup;
/// HTTP client for the presign API and presigned URLs
pub mod client;
/// Environment configuration
pub mod config;
/// Error types
pub mod error;
/// Presign, PUT and read-back check
pub mod roundtrip;
/// Sequential step runner
pub mod runner;

pub use cleanup::{clear_prefix, CleanupSummary, DeleteBatches};
pub use client::{ApiResponse, UploadApiClient};
pub use config::VerifierConfig;
pub use error::{VerifierError, VerifierResult};
pub use runner::{RunReport, Step, StepOutcome, StepReport, Verifier};
