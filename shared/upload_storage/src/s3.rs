use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
    error::SdkError,
    operation::head_object::HeadObjectError,
    presigning::PresigningConfig,
    types::{Delete, ObjectIdentifier},
    Client as S3Client,
};
use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::{ListPage, ObjectStore, PresignedUrl, StorageError, StorageResult, UploadSigner};

/// Presigned PUT issuance backed by the S3 SDK
///
/// Signing happens locally with the client's credentials; no request reaches S3.
pub struct S3UploadSigner {
    s3_client: Arc<S3Client>,
}

impl S3UploadSigner {
    /// Creates a new signer
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl UploadSigner for S3UploadSigner {
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<PresignedUrl> {
        let presigned_config = PresigningConfig::expires_in(expires_in).map_err(|e| {
            StorageError::ConfigError(format!("Failed to create presigning config: {e}"))
        })?;

        let presigned_request = self
            .s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigned_config)
            .await
            .map_err(|e| StorageError::S3Error(format!("Failed to generate presigned URL: {e}")))?;

        let expires_at: DateTime<Utc> = Utc::now() + expires_in;

        debug!("Generated presigned URL for object: {key} expires at: {expires_at}");

        Ok(PresignedUrl {
            url: presigned_request.uri().to_string(),
            expires_at,
        })
    }
}

/// Object store operations on a single S3 bucket
pub struct S3ObjectStore {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl S3ObjectStore {
    /// Creates a new object store client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - Bucket every operation targets
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }

    /// Bucket this store operates on
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_page(
        &self,
        prefix: &str,
        continuation_token: Option<String>,
    ) -> StorageResult<ListPage> {
        let response = self
            .s3_client
            .list_objects_v2()
            .bucket(&self.bucket_name)
            .prefix(prefix)
            .set_continuation_token(continuation_token)
            .send()
            .await?;

        let keys = response
            .contents()
            .iter()
            .filter_map(|object| object.key().map(ToString::to_string))
            .collect();

        let next_continuation_token = if response.is_truncated().unwrap_or(false) {
            response.next_continuation_token().map(ToString::to_string)
        } else {
            None
        };

        Ok(ListPage {
            keys,
            next_continuation_token,
        })
    }

    async fn delete_batch(&self, keys: &[String]) -> StorageResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let objects = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(true)
            .build()?;

        let response = self
            .s3_client
            .delete_objects()
            .bucket(&self.bucket_name)
            .delete(delete)
            .send()
            .await?;

        let failures = response.errors();
        if let Some(first) = failures.first() {
            let first = format!(
                "{}: {}",
                first.key().unwrap_or("<unknown key>"),
                first.message().unwrap_or("no message")
            );
            error!("Batch delete left {} object(s) behind: {first}", failures.len());
            return Err(StorageError::BatchDeleteFailed {
                failed: failures.len(),
                first,
            });
        }

        debug!("Deleted {} object(s) from {}", keys.len(), self.bucket_name);
        Ok(())
    }

    async fn object_exists(&self, key: &str) -> StorageResult<bool> {
        let result = self
            .s3_client
            .head_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), HeadObjectError::NotFound(_)) =>
            {
                Ok(false)
            }
            Err(e) => Err(StorageError::from(e)),
        }
    }

    async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        let response = self
            .s3_client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::S3Error(format!("Failed to read object body: {e}")))?;

        Ok(body.into_bytes().to_vec())
    }
}
