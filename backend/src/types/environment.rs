//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use strum::Display;
use thiserror::Error;
use upload_storage::AwsSettings;

use super::UploadSettings;

/// Default lifetime of a presigned upload URL
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 60 * 60;

/// `APP_ENV` held a value that names no known stage
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid environment: {0}")]
pub struct InvalidEnvironment(pub String);

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    /// Production stage
    Production,
    /// Test stage, deployed ahead of production and checked by the integration verifier
    Test,
    /// Development environment (uses `LocalStack`)
    Development {
        /// Optional override for presigned URL expiry in seconds
        presign_expiry_override: Option<u64>,
    },
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// Defaults to development when unset.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnvironment` if `APP_ENV` contains an unknown value
    pub fn from_env() -> Result<Self, InvalidEnvironment> {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            "development" => {
                let presign_expiry_override = env::var("PRESIGNED_URL_EXPIRY_SECS")
                    .ok()
                    .and_then(|val| val.parse::<u64>().ok());

                Ok(Self::Development {
                    presign_expiry_override,
                })
            }
            _ => Err(InvalidEnvironment(env)),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development { .. } | Self::Test)
    }

    /// Whether logs are emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Test)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Production | Self::Test => None,
            Self::Development { .. } => Some("http://localhost:4566"),
        }
    }

    /// AWS settings for the upload bucket's client
    #[must_use]
    pub fn aws_settings(&self, upload: &UploadSettings) -> AwsSettings {
        AwsSettings::new(
            upload.region.clone(),
            self.override_aws_endpoint_url().map(ToString::to_string),
        )
    }

    /// Presigned URL lifetime
    #[must_use]
    pub const fn presigned_url_expiry(&self) -> Duration {
        match self {
            Self::Production | Self::Test => Duration::from_secs(DEFAULT_PRESIGN_EXPIRY_SECS),
            Self::Development {
                presign_expiry_override,
            } => match presign_expiry_override {
                Some(secs) => Duration::from_secs(*secs),
                None => Duration::from_secs(DEFAULT_PRESIGN_EXPIRY_SECS),
            },
        }
    }
}
