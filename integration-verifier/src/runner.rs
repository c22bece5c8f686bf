use std::sync::Arc;

use strum::Display;
use tracing::{error, info};
use upload_storage::{ObjectStore, S3ObjectStore};

use crate::cleanup::{clear_prefix, CleanupSummary};
use crate::{checks, roundtrip, UploadApiClient, VerifierConfig, VerifierResult};

/// Verification steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Step {
    /// A valid filename is presigned into the namespace
    #[strum(serialize = "Presign API success")]
    PresignSuccess,
    /// An object without `filename` is rejected
    #[strum(serialize = "Presign validation (missing filename)")]
    MissingFilename,
    /// An empty `filename` is rejected
    #[strum(serialize = "Presign validation (empty filename)")]
    EmptyFilename,
    /// A body that is not JSON is rejected
    #[strum(serialize = "Presign validation (invalid JSON)")]
    InvalidJson,
    /// Presign, PUT and read back through the bucket
    #[strum(serialize = "Upload round-trip")]
    UploadRoundTrip,
}

impl Step {
    /// Every step in the order they run
    pub const ALL: [Self; 5] = [
        Self::PresignSuccess,
        Self::MissingFilename,
        Self::EmptyFilename,
        Self::InvalidJson,
        Self::UploadRoundTrip,
    ];
}

/// How a step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step observed the expected behaviour
    Passed,
    /// The step failed with this message
    Failed(String),
}

/// Outcome of one executed step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Which step ran
    pub step: Step,
    /// How it ended
    pub outcome: StepOutcome,
}

/// Summary of a verification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// What the cleanup pre-step removed
    pub cleanup: CleanupSummary,
    /// Executed steps; stops at the first failure
    pub steps: Vec<StepReport>,
}

impl RunReport {
    /// Whether every step ran and passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.steps.len() == Step::ALL.len()
            && self
                .steps
                .iter()
                .all(|report| report.outcome == StepOutcome::Passed)
    }

    /// The failed step, if any
    #[must_use]
    pub fn failure(&self) -> Option<&StepReport> {
        self.steps
            .iter()
            .find(|report| matches!(report.outcome, StepOutcome::Failed(_)))
    }
}

/// Runs the cleanup pre-step and every check against one deployment
pub struct Verifier {
    api: UploadApiClient,
    store: Arc<dyn ObjectStore>,
    key_prefix: String,
}

impl Verifier {
    /// Creates a verifier over an API client and the bucket's store
    #[must_use]
    pub fn new(
        api: UploadApiClient,
        store: Arc<dyn ObjectStore>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            api,
            store,
            key_prefix: key_prefix.into(),
        }
    }

    /// Creates a verifier talking to the configured API and S3 bucket
    pub async fn from_config(config: &VerifierConfig) -> Self {
        let client = Arc::new(config.aws_settings().s3_client().await);
        let store = S3ObjectStore::new(client, config.bucket.clone());

        Self::new(
            UploadApiClient::new(&config.api_base_url),
            Arc::new(store),
            config.key_prefix.clone(),
        )
    }

    /// Clears the namespace, then runs each step until one fails
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::Cleanup` if the namespace could not be cleared;
    /// step failures are reported in the `RunReport`
    pub async fn run(&self) -> VerifierResult<RunReport> {
        info!(prefix = %self.key_prefix, "Clearing upload prefix");
        let cleanup = clear_prefix(self.store.as_ref(), &self.key_prefix).await?;

        let mut steps = Vec::with_capacity(Step::ALL.len());
        for step in Step::ALL {
            let outcome = match self.run_step(step).await {
                Ok(()) => {
                    info!("  OK: {step}");
                    StepOutcome::Passed
                }
                Err(e) => {
                    error!("  FAIL: {step}: {e}");
                    StepOutcome::Failed(e.to_string())
                }
            };

            let failed = outcome != StepOutcome::Passed;
            steps.push(StepReport { step, outcome });
            if failed {
                break;
            }
        }

        Ok(RunReport { cleanup, steps })
    }

    async fn run_step(&self, step: Step) -> VerifierResult<()> {
        match step {
            Step::PresignSuccess => checks::presign_success(&self.api, &self.key_prefix).await,
            Step::MissingFilename => checks::missing_filename(&self.api).await,
            Step::EmptyFilename => checks::empty_filename(&self.api).await,
            Step::InvalidJson => checks::invalid_json(&self.api).await,
            Step::UploadRoundTrip => {
                roundtrip::upload_round_trip(&self.api, self.store.as_ref(), &self.key_prefix)
                    .await
                    .map(|_| ())
            }
        }
    }
}
