//! Presigned upload issuance
//!
//! Turns an upload intent into a storage key and a presigned PUT URL for it.
//! The service holds only immutable shared state; every request computes its
//! own key, so concurrent requests need no coordination.
mod error;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use common_types::{PresignResponse, StorageKey, UploadIntent};
use serde_json::Value;
use tracing::{info, instrument};
use upload_storage::UploadSigner;

pub use error::{PresignError, PresignResult};

use crate::{
    identity::IdentityResolver,
    types::{UploadRequest, UploadSettings},
};

/// Parses and validates an upload-intent body
///
/// An empty body is read as `{}`. Anything that is not JSON is
/// `InvalidJson`; JSON without a non-empty string `filename` is
/// `InvalidFilename`.
///
/// # Errors
///
/// Returns `PresignError::InvalidJson` or `PresignError::InvalidFilename`
pub fn parse_upload_intent(body: &[u8]) -> PresignResult<UploadIntent> {
    let value: Value = if body.is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(body)?
    };

    match value.get("filename") {
        Some(Value::String(filename)) if !filename.is_empty() => Ok(UploadIntent {
            filename: filename.clone(),
        }),
        _ => Err(PresignError::InvalidFilename),
    }
}

/// Issues presigned upload URLs under the configured namespace
pub struct UploadService {
    settings: UploadSettings,
    signer: Arc<dyn UploadSigner>,
    identity: Arc<dyn IdentityResolver>,
    expiry: Duration,
}

impl UploadService {
    /// Creates a new upload service
    ///
    /// # Arguments
    ///
    /// * `settings` - Bucket, region and key namespace (possibly incomplete)
    /// * `signer` - Issues the presigned PUT URLs
    /// * `identity` - Resolves the user each key is attributed to
    /// * `expiry` - Lifetime of every issued URL
    #[must_use]
    pub fn new(
        settings: UploadSettings,
        signer: Arc<dyn UploadSigner>,
        identity: Arc<dyn IdentityResolver>,
        expiry: Duration,
    ) -> Self {
        Self {
            settings,
            signer,
            identity,
            expiry,
        }
    }

    /// Settings this service was built with
    #[must_use]
    pub const fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    /// Handles one request as extracted by the router
    ///
    /// Settings are checked before the body's read result, so a
    /// misconfigured deployment answers every request with a configuration
    /// error whatever was sent.
    ///
    /// # Errors
    ///
    /// As [`Self::presign`], plus `PresignError::BodyTooLarge` and
    /// `PresignError::UnreadableBody` when the body could not be read
    pub async fn presign_request(&self, request: UploadRequest) -> PresignResult<PresignResponse> {
        self.settings.target()?;
        let body = request.body?;
        self.presign(&request.headers, &body).await
    }

    /// Handles one upload intent
    ///
    /// Checks run in a fixed order: settings first, then the body, then the
    /// caller's identity. Only then is a key generated and signed.
    ///
    /// # Errors
    ///
    /// - `PresignError::Configuration` - bucket or region is not configured
    /// - `PresignError::InvalidJson` / `PresignError::InvalidFilename` - bad body
    /// - `PresignError::Identity` - the caller could not be identified
    /// - `PresignError::Credential` - the signer failed
    #[instrument(skip_all)]
    pub async fn presign(&self, headers: &HeaderMap, body: &[u8]) -> PresignResult<PresignResponse> {
        let target = self.settings.target()?;
        let intent = parse_upload_intent(body)?;
        let user_id = self.identity.resolve(headers).await?;

        let key = StorageKey::generate(target.key_prefix, &user_id, &intent.filename);

        let presigned = self
            .signer
            .presign_put(target.bucket_name, key.as_str(), self.expiry)
            .await?;

        info!(
            key = %key,
            bucket = target.bucket_name,
            expires_at = %presigned.expires_at,
            "Issued presigned upload URL"
        );

        Ok(PresignResponse {
            url: presigned.url,
            key: key.into_string(),
        })
    }
}
