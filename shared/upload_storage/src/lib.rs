//! Object storage operations for browser uploads
//!
//! This crate provides the storage seams shared between the presign backend
//! and the integration verifier: issuing presigned PUT URLs, and listing,
//! deleting and reading objects under an upload prefix.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// AWS SDK configuration shared by every S3 client
pub mod aws;
/// Error types for storage operations
pub mod error;
/// S3-backed implementations
pub mod s3;
/// Presigned URL issuance
pub mod signer;
/// Listing, deleting and reading objects
pub mod store;

/// In-memory object store for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use aws::AwsSettings;
pub use error::{StorageError, StorageResult};
pub use s3::{S3ObjectStore, S3UploadSigner};
pub use signer::{PresignedUrl, UploadSigner};
pub use store::{ListPage, ObjectStore};
