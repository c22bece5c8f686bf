//! Signers for tests that must not reach AWS

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use upload_storage::{PresignedUrl, StorageError, StorageResult, UploadSigner};

/// One `presign_put` call seen by a [`RecordingSigner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRequest {
    /// Bucket the URL was requested for
    pub bucket: String,
    /// Key the URL was requested for
    pub key: String,
    /// Requested lifetime
    pub expires_in: Duration,
}

/// Signer that records requests and returns `<base_url>/<key>?X-Amz-Expires=<secs>`
#[derive(Debug)]
pub struct RecordingSigner {
    base_url: Option<String>,
    calls: Mutex<Vec<SignRequest>>,
}

impl Default for RecordingSigner {
    fn default() -> Self {
        Self {
            base_url: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingSigner {
    /// URLs point below `base_url` instead of a fake S3 host
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked
    #[must_use]
    pub fn calls(&self) -> Vec<SignRequest> {
        self.calls.lock().expect("signer lock poisoned").clone()
    }
}

#[async_trait]
impl UploadSigner for RecordingSigner {
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<PresignedUrl> {
        self.calls
            .lock()
            .map_err(|e| StorageError::S3Error(e.to_string()))?
            .push(SignRequest {
                bucket: bucket.to_string(),
                key: key.to_string(),
                expires_in,
            });

        let base = self
            .base_url
            .clone()
            .unwrap_or_else(|| format!("https://{bucket}.s3.amazonaws.test"));

        Ok(PresignedUrl {
            url: format!("{base}/{key}?X-Amz-Expires={}", expires_in.as_secs()),
            expires_at: Utc::now() + expires_in,
        })
    }
}

/// Signer that always fails, as if credentials were unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSigner;

#[async_trait]
impl UploadSigner for FailingSigner {
    async fn presign_put(
        &self,
        _bucket: &str,
        _key: &str,
        _expires_in: Duration,
    ) -> StorageResult<PresignedUrl> {
        Err(StorageError::AwsError(
            "failed to load credentials from the provider chain".to_string(),
        ))
    }
}
