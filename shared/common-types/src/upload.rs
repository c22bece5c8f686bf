use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Body of `POST /uploaded`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UploadIntent {
    /// Name of the file the browser wants to upload; any path is discarded
    #[schemars(length(min = 1))]
    pub filename: String,
}

/// Successful presign response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PresignResponse {
    /// Presigned URL accepting a single PUT of the file body
    pub url: String,
    /// Storage key the object will be written to
    pub key: String,
}

/// Error body returned for every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}
