use thiserror::Error;
use upload_storage::StorageError;

/// Result type for verifier operations
pub type VerifierResult<T> = Result<T, VerifierError>;

/// Errors raised while verifying a deployment
#[derive(Error, Debug)]
pub enum VerifierError {
    /// A required environment variable is unset or empty
    #[error("Missing required env: {0}")]
    MissingEnv(&'static str),

    /// Clearing the upload namespace failed
    #[error("Cleanup failed: {0}")]
    Cleanup(#[source] StorageError),

    /// A check observed something other than the advertised contract
    #[error("{0}")]
    Check(String),

    /// The HTTP request itself failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading back from storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Fails with `VerifierError::Check` unless `condition` holds
///
/// # Errors
///
/// Returns `VerifierError::Check` carrying the lazily built message
pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> VerifierResult<()> {
    if condition {
        Ok(())
    } else {
        Err(VerifierError::Check(message()))
    }
}
