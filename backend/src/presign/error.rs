//! Error types for presign requests

use thiserror::Error;
use upload_storage::StorageError;

use crate::{identity::IdentityError, types::MissingSetting};

/// Result type for presign operations
pub type PresignResult<T> = Result<T, PresignError>;

/// Every way a presign request can fail
#[derive(Error, Debug)]
pub enum PresignError {
    /// Upload settings are incomplete
    #[error("Server configuration error: {0}")]
    Configuration(#[from] MissingSetting),

    /// Body is not well-formed JSON
    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Body exceeded the router's size limit
    #[error("Request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    /// Body could not be read off the connection
    #[error("Failed to read request body: {0}")]
    UnreadableBody(String),

    /// `filename` is missing, not a string, or empty
    #[error("Missing or invalid \"filename\" in body")]
    InvalidFilename,

    /// Caller could not be identified
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Storage layer failed to issue the presigned URL
    #[error("Failed to issue upload credential: {0}")]
    Credential(#[from] StorageError),
}
