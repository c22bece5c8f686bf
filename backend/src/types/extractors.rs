//! Custom extractors for presign requests

use std::convert::Infallible;

use aide::operation::OperationInput;
use aide::OperationOutput;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, StatusCode},
    Json,
};
use common_types::UploadIntent;

use crate::presign::PresignError;
use crate::types::error::AppError;

/// Largest request body read before parsing, applied as the router's body limit
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Raw headers and body of an upload-intent request
///
/// Neither reading nor parsing the body rejects the request here. Failures
/// are carried to the handler so configuration problems are reported before
/// anything about the body.
pub struct UploadRequest {
    /// Request headers, handed to identity resolution
    pub headers: HeaderMap,
    /// Unparsed request body, or why it could not be read
    pub body: Result<Bytes, PresignError>,
}

impl<S> FromRequest<S> for UploadRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                PresignError::BodyTooLarge(MAX_BODY_BYTES)
            } else {
                PresignError::UnreadableBody(rejection.body_text())
            }
        });

        Ok(Self { headers, body })
    }
}

impl OperationInput for UploadRequest {
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        // Documented as the JSON body it is parsed into
        Json::<UploadIntent>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AppError::inferred_responses(ctx, operation)
    }
}
