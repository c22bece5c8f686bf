use serde_json::json;
use tracing::{debug, instrument};
use upload_storage::ObjectStore;

use crate::checks::expect_presigned;
use crate::error::ensure;
use crate::{UploadApiClient, VerifierResult};

/// Filename presigned by the round-trip
pub const ROUNDTRIP_FILENAME: &str = "roundtrip.txt";

/// Bytes written through the presigned URL and expected back
pub const ROUNDTRIP_CONTENT: &[u8] = b"integration test content";

/// Presigns an upload, PUTs known bytes and reads them back from the bucket
///
/// Returns the key written.
///
/// # Errors
///
/// Returns `VerifierError::Check` if the upload or read-back deviates,
/// `Http` or `Storage` on transport failures
#[instrument(skip_all, fields(prefix = %prefix))]
pub async fn upload_round_trip(
    api: &UploadApiClient,
    store: &dyn ObjectStore,
    prefix: &str,
) -> VerifierResult<String> {
    let response = api.post_json(&json!({ "filename": ROUNDTRIP_FILENAME })).await?;
    let presigned = expect_presigned(&response, prefix)?;
    debug!(key = %presigned.key, "Presigned round-trip upload");

    let put = api
        .put_presigned(&presigned.url, ROUNDTRIP_CONTENT.to_vec())
        .await?;
    ensure(put.status.is_success(), || {
        format!(
            "PUT to presigned URL failed: {} {}",
            put.status.as_u16(),
            put.body
        )
    })?;

    let exists = store.object_exists(&presigned.key).await?;
    ensure(exists, || {
        format!("Object not found after upload: {}", presigned.key)
    })?;

    let body = store.get_object(&presigned.key).await?;
    ensure(body == ROUNDTRIP_CONTENT, || {
        format!(
            "Object content mismatch: expected {:?}, got {:?}",
            String::from_utf8_lossy(ROUNDTRIP_CONTENT),
            String::from_utf8_lossy(&body)
        )
    })?;

    Ok(presigned.key)
}
