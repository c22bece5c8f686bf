use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// AWS SDK error (dispatch, timeout, credentials)
    #[error("AWS SDK error: {0}")]
    AwsError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),

    /// A request could not be built from the given input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A batch delete reported per-key failures
    #[error("Failed to delete {failed} object(s), first error: {first}")]
    BatchDeleteFailed {
        /// Number of keys S3 refused to delete
        failed: usize,
        /// Description of the first failure
        first: String,
    },
}

impl StorageError {
    /// Checks if this error represents an upstream (5xx) error
    #[must_use]
    pub const fn is_upstream_error(&self) -> bool {
        matches!(self, Self::UpstreamError(_))
    }
}

impl<E> From<SdkError<E>> for StorageError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: SdkError<E>) -> Self {
        match &error {
            SdkError::ServiceError(service_err) if service_err.raw().status().as_u16() >= 500 => {
                Self::UpstreamError(DisplayErrorContext(&error).to_string())
            }
            SdkError::ServiceError(_) => Self::S3Error(DisplayErrorContext(&error).to_string()),
            _ => Self::AwsError(DisplayErrorContext(&error).to_string()),
        }
    }
}

impl From<aws_sdk_s3::error::BuildError> for StorageError {
    fn from(error: aws_sdk_s3::error::BuildError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}
