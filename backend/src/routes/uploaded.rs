//! `POST /uploaded`

use std::sync::Arc;

use axum::{Extension, Json};
use common_types::PresignResponse;
use tracing::instrument;

use crate::{
    presign::UploadService,
    types::{AppError, UploadRequest},
};

/// Creates a presigned URL for uploading one file
///
/// The body is `{ "filename": string }`. The response carries the presigned
/// PUT URL and the key the object will land at; the browser uploads directly
/// to storage with it. The URL expires one hour after issuance.
///
/// # Errors
///
/// - 500 `Server configuration error` when bucket or region is not configured
/// - 413 `Request body too large` when the body exceeds 64 KiB
/// - 400 `Invalid JSON body` when the body is not JSON
/// - 400 `Missing or invalid "filename" in body` when `filename` is absent,
///   not a string, or empty
/// - 500 `Internal server error` when the URL cannot be issued
#[instrument(skip_all)]
pub async fn create_presigned_upload(
    Extension(upload_service): Extension<Arc<UploadService>>,
    request: UploadRequest,
) -> Result<Json<PresignResponse>, AppError> {
    let response = upload_service.presign_request(request).await?;

    Ok(Json(response))
}
