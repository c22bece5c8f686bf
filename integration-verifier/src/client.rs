use reqwest::{header::CONTENT_TYPE, Body, Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{VerifierError, VerifierResult};

/// Status and raw body of an HTTP response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Response status
    pub status: StatusCode,
    /// Response body as text
    pub body: String,
}

impl ApiResponse {
    async fn read(response: reqwest::Response) -> VerifierResult<Self> {
        let status = response.status();
        let body = response.text().await?;
        Ok(Self { status, body })
    }

    /// Parses the body as JSON
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::Check` if the body is not the expected JSON
    pub fn json<T: DeserializeOwned>(&self) -> VerifierResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            VerifierError::Check(format!("Response is not valid JSON ({e}): {}", self.body))
        })
    }
}

/// Client for `POST /uploaded` and for writing through presigned URLs
#[derive(Debug, Clone)]
pub struct UploadApiClient {
    http: Client,
    endpoint: String,
}

impl UploadApiClient {
    /// Creates a client for the API rooted at `base_url`
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(http: Client, base_url: &str) -> Self {
        let endpoint = if base_url.ends_with('/') {
            format!("{base_url}uploaded")
        } else {
            format!("{base_url}/uploaded")
        };
        Self { http, endpoint }
    }

    /// Full URL of the presign endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `body` verbatim as a JSON request
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::Http` if the request cannot be sent or read
    pub async fn post_raw(&self, body: impl Into<Body>) -> VerifierResult<ApiResponse> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        ApiResponse::read(response).await
    }

    /// Posts a JSON value
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::Http` if the request cannot be sent or read
    pub async fn post_json(&self, payload: &serde_json::Value) -> VerifierResult<ApiResponse> {
        self.post_raw(payload.to_string()).await
    }

    /// Writes `body` through a presigned PUT URL
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::Http` if the request cannot be sent or read
    pub async fn put_presigned(&self, url: &str, body: Vec<u8>) -> VerifierResult<ApiResponse> {
        let response = self.http.put(url).body(body).send().await?;
        ApiResponse::read(response).await
    }
}
