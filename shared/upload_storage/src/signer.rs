use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::StorageResult;

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL for PUT operations
    pub url: String,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Issues time-bounded write credentials for a single object
#[async_trait]
pub trait UploadSigner: Send + Sync {
    /// Generates a presigned URL allowing one PUT to `key` in `bucket`
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the credential cannot be issued
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<PresignedUrl>;
}
