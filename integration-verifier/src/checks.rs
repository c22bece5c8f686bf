use common_types::{ErrorResponse, PresignResponse};
use reqwest::StatusCode;
use serde_json::json;

use crate::error::ensure;
use crate::{ApiResponse, UploadApiClient, VerifierResult};

/// Filename used by the success check
pub const SUCCESS_FILENAME: &str = "integration-test.pdf";

fn expect_status(response: &ApiResponse, expected: StatusCode) -> VerifierResult<()> {
    ensure(response.status == expected, || {
        format!(
            "Expected {}, got {}: {}",
            expected.as_u16(),
            response.status.as_u16(),
            response.body
        )
    })
}

/// Checks a presign response carries a usable URL and a key in `prefix`
///
/// # Errors
///
/// Returns `VerifierError::Check` describing the first violated expectation
pub fn expect_presigned(response: &ApiResponse, prefix: &str) -> VerifierResult<PresignResponse> {
    expect_status(response, StatusCode::OK)?;
    let presigned: PresignResponse = response.json()?;

    ensure(!presigned.url.is_empty() && !presigned.key.is_empty(), || {
        format!("Missing url or key in response: {}", response.body)
    })?;
    ensure(presigned.key.starts_with(prefix), || {
        format!("Key does not start with {prefix}: {}", presigned.key)
    })?;

    Ok(presigned)
}

/// `{"filename":"integration-test.pdf"}` yields a URL and a namespaced key
///
/// # Errors
///
/// Returns `VerifierError::Check` on contract violations, `Http` on transport failures
pub async fn presign_success(api: &UploadApiClient, prefix: &str) -> VerifierResult<()> {
    let response = api.post_json(&json!({ "filename": SUCCESS_FILENAME })).await?;
    let presigned = expect_presigned(&response, prefix)?;

    ensure(
        presigned.key.contains("integration-test") || presigned.key.contains("integration_test"),
        || format!("Key does not reflect the filename: {}", presigned.key),
    )
}

/// `{}` is rejected with 400 and an error message
///
/// # Errors
///
/// Returns `VerifierError::Check` on contract violations, `Http` on transport failures
pub async fn missing_filename(api: &UploadApiClient) -> VerifierResult<()> {
    let response = api.post_json(&json!({})).await?;
    expect_status(&response, StatusCode::BAD_REQUEST)?;

    let error: ErrorResponse = response.json()?;
    ensure(!error.error.is_empty(), || {
        format!("Expected an error message, got: {}", response.body)
    })
}

/// `{"filename":""}` is rejected with 400
///
/// # Errors
///
/// Returns `VerifierError::Check` on contract violations, `Http` on transport failures
pub async fn empty_filename(api: &UploadApiClient) -> VerifierResult<()> {
    let response = api.post_json(&json!({ "filename": "" })).await?;
    expect_status(&response, StatusCode::BAD_REQUEST)
}

/// A body that is not JSON is rejected with 400
///
/// # Errors
///
/// Returns `VerifierError::Check` on contract violations, `Http` on transport failures
pub async fn invalid_json(api: &UploadApiClient) -> VerifierResult<()> {
    let response = api.post_raw("not json").await?;
    expect_status(&response, StatusCode::BAD_REQUEST)
}
