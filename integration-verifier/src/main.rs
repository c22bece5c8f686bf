use std::process::ExitCode;

use integration_verifier::{Verifier, VerifierConfig};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match VerifierConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    info!(
        api = %config.api_base_url,
        bucket = %config.bucket,
        "Running integration checks"
    );

    let verifier = Verifier::from_config(&config).await;
    let report = verifier.run().await?;

    if report.passed() {
        info!("All integration tests passed.");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
