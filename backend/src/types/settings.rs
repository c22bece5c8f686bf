//! Upload bucket settings supplied by the deployment

use std::env;

use common_types::DEFAULT_KEY_PREFIX;

/// Bucket, region and key namespace of the upload store
///
/// Bucket and region are optional so a misconfigured deployment still starts
/// and answers every presign request with a configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    /// Bucket receiving uploads (`BUCKET_NAME`)
    pub bucket_name: Option<String>,
    /// Region of the bucket (`REGION`)
    pub region: Option<String>,
    /// Namespace every key starts with (`KEY_PREFIX`)
    pub key_prefix: String,
}

/// Fully resolved upload destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTarget<'a> {
    /// Bucket receiving uploads
    pub bucket_name: &'a str,
    /// Region of the bucket
    pub region: &'a str,
    /// Namespace every key starts with
    pub key_prefix: &'a str,
}

/// A required setting is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("missing required setting {0}")]
pub struct MissingSetting(pub &'static str);

impl UploadSettings {
    /// Reads the settings from the process environment
    ///
    /// Empty bucket or region values count as unset. An empty `KEY_PREFIX`
    /// is kept and puts keys at the bucket root.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            bucket_name: non_empty_var("BUCKET_NAME"),
            region: non_empty_var("REGION"),
            key_prefix: env::var("KEY_PREFIX").unwrap_or_else(|_| DEFAULT_KEY_PREFIX.to_string()),
        }
    }

    /// Creates fully populated settings
    #[must_use]
    pub fn new(
        bucket_name: impl Into<String>,
        region: impl Into<String>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            bucket_name: Some(bucket_name.into()),
            region: Some(region.into()),
            key_prefix: key_prefix.into(),
        }
    }

    /// Resolves the upload destination
    ///
    /// # Errors
    ///
    /// Returns `MissingSetting` naming the first absent variable
    pub fn target(&self) -> Result<UploadTarget<'_>, MissingSetting> {
        let bucket_name = self
            .bucket_name
            .as_deref()
            .ok_or(MissingSetting("BUCKET_NAME"))?;
        let region = self.region.as_deref().ok_or(MissingSetting("REGION"))?;

        Ok(UploadTarget {
            bucket_name,
            region,
            key_prefix: &self.key_prefix,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
