use std::sync::Arc;

use backend::{
    identity::StaticIdentity,
    presign::UploadService,
    server,
    types::{Environment, UploadSettings},
};
use tracing_subscriber::{fmt, EnvFilter};
use upload_storage::S3UploadSigner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env()?;

    // JSON logs for deployed stages, regular format for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    let settings = UploadSettings::from_env();
    if let Err(missing) = settings.target() {
        // Keep serving; every presign request reports the configuration error
        tracing::error!("Upload settings incomplete ({missing}), presign requests will fail");
    }

    let s3_client = Arc::new(environment.aws_settings(&settings).s3_client().await);
    let upload_service = Arc::new(UploadService::new(
        settings,
        Arc::new(S3UploadSigner::new(s3_client)),
        Arc::new(StaticIdentity::default()),
        environment.presigned_url_expiry(),
    ));

    tracing::info!("Starting upload backend in {environment} environment");

    server::start(environment, upload_service).await
}
