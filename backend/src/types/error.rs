//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common_types::ErrorResponse;

use crate::presign::PresignError;

/// Message returned when the upload settings are incomplete
pub const CONFIGURATION_ERROR: &str = "Server configuration error";
/// Message returned when the body is not JSON
pub const INVALID_JSON: &str = "Invalid JSON body";
/// Message returned when the body exceeds the size limit
pub const BODY_TOO_LARGE: &str = "Request body too large";
/// Message returned when `filename` is absent, not a string or empty
pub const INVALID_FILENAME: &str = "Missing or invalid \"filename\" in body";
/// Message returned when the caller cannot be identified
pub const UNAUTHORIZED: &str = "Unauthorized";
/// Message returned for every unexpected failure
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Application error: a status code and the `{ "error": ... }` body
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            inner: ErrorResponse {
                error: message.to_string(),
            },
        }
    }

    /// HTTP status of this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Message sent to the client
    #[must_use]
    pub fn message(&self) -> &str {
        &self.inner.error
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {} - {}", self.status, self.inner.error),
            500..=599 => tracing::error!("Server error: {} - {}", self.status, self.inner.error),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert presign failures to application errors
///
/// Internal detail is logged here and never reaches the response body.
impl From<PresignError> for AppError {
    fn from(err: PresignError) -> Self {
        match &err {
            PresignError::Configuration(missing) => {
                tracing::error!("Upload settings incomplete: {missing}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, CONFIGURATION_ERROR)
            }
            PresignError::InvalidJson(e) => {
                tracing::debug!("Rejected body: {e}");
                Self::new(StatusCode::BAD_REQUEST, INVALID_JSON)
            }
            PresignError::BodyTooLarge(limit) => {
                tracing::debug!("Rejected body over {limit} bytes");
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE)
            }
            PresignError::UnreadableBody(e) => {
                tracing::debug!("Unreadable body: {e}");
                Self::new(StatusCode::BAD_REQUEST, INVALID_JSON)
            }
            PresignError::InvalidFilename => Self::new(StatusCode::BAD_REQUEST, INVALID_FILENAME),
            PresignError::Identity(e) => {
                tracing::warn!("Identity resolution failed: {e}");
                Self::new(StatusCode::UNAUTHORIZED, UNAUTHORIZED)
            }
            PresignError::Credential(e) => {
                tracing::error!("Credential issuance failed: {e}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ErrorResponse>::operation_response(ctx, operation)
    }

    fn inferred_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        Self::operation_response(ctx, operation).map_or_else(Vec::new, |response| {
            vec![
                (Some(400), response.clone()),
                (Some(413), response.clone()),
                (Some(500), response),
            ]
        })
    }
}
