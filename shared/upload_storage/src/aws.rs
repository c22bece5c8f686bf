use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};

/// Region and endpoint overrides applied on top of the default AWS provider chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsSettings {
    /// Explicit region; falls back to the provider chain when `None`
    pub region: Option<String>,
    /// Custom endpoint (`LocalStack`, `MinIO`); enables path-style addressing
    pub endpoint_url: Option<String>,
}

impl AwsSettings {
    /// Creates settings with the given overrides
    #[must_use]
    pub const fn new(region: Option<String>, endpoint_url: Option<String>) -> Self {
        Self {
            region,
            endpoint_url,
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn sdk_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(region) = &self.region {
            config_builder = config_builder.region(Region::new(region.clone()));
        }

        if let Some(endpoint_url) = &self.endpoint_url {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.sdk_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Custom endpoints don't resolve virtual-hosted bucket names
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if self.endpoint_url.is_some() {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Builds an S3 client from these settings
    pub async fn s3_client(&self) -> aws_sdk_s3::Client {
        aws_sdk_s3::Client::from_conf(self.s3_client_config().await)
    }
}
