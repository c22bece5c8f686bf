use std::env;

use common_types::DEFAULT_KEY_PREFIX;
use upload_storage::AwsSettings;

use crate::{VerifierError, VerifierResult};

/// Where the verifier finds the deployment under test
///
/// | Variable | Required |
/// |---|---|
/// | `UPLOAD_API_URL` | yes, base URL of the presign API |
/// | `TEST_BUCKET` | yes, bucket the API presigns into |
/// | `AWS_REGION` | no |
/// | `UPLOAD_PREFIX` | no, defaults to the upload namespace |
/// | `AWS_ENDPOINT_URL` | no, custom S3 endpoint such as `LocalStack` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Base URL of the presign API, without a trailing slash
    pub api_base_url: String,
    /// Bucket the API presigns into
    pub bucket: String,
    /// Region of the bucket
    pub region: Option<String>,
    /// Namespace cleaned before the run and expected on every key
    pub key_prefix: String,
    /// Custom S3 endpoint
    pub endpoint_url: Option<String>,
}

impl VerifierConfig {
    /// Reads the configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::MissingEnv` naming the first missing variable
    pub fn from_env() -> VerifierResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through `lookup`; empty values count as unset
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::MissingEnv` naming the first missing variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> VerifierResult<Self> {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let require = |name: &'static str| get(name).ok_or(VerifierError::MissingEnv(name));

        let api_base_url = require("UPLOAD_API_URL")?;
        let bucket = require("TEST_BUCKET")?;

        Ok(Self {
            api_base_url: api_base_url
                .strip_suffix('/')
                .unwrap_or(&api_base_url)
                .to_string(),
            bucket,
            region: get("AWS_REGION"),
            key_prefix: get("UPLOAD_PREFIX").unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
            endpoint_url: get("AWS_ENDPOINT_URL"),
        })
    }

    /// AWS settings for the bucket's client
    #[must_use]
    pub fn aws_settings(&self) -> AwsSettings {
        AwsSettings::new(self.region.clone(), self.endpoint_url.clone())
    }
}
