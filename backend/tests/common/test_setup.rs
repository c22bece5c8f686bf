use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use backend::{
    identity::StaticIdentity,
    presign::{testing::RecordingSigner, UploadService},
    server,
    types::{Environment, UploadSettings},
};
use common_types::DEFAULT_KEY_PREFIX;
use tower::ServiceExt;
use upload_storage::UploadSigner;

pub const TEST_BUCKET: &str = "cloudviewer-uploads-test";
pub const TEST_REGION: &str = "us-east-1";

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router wired to a recording signer, so no request leaves the process
pub struct TestContext {
    pub router: Router,
    pub signer: Arc<RecordingSigner>,
}

impl TestContext {
    /// Fully configured service in the development environment
    pub fn new() -> Self {
        Self::with_settings(
            UploadSettings::new(TEST_BUCKET, TEST_REGION, DEFAULT_KEY_PREFIX),
            Environment::Development {
                presign_expiry_override: None,
            },
        )
    }

    pub fn with_settings(settings: UploadSettings, environment: Environment) -> Self {
        let signer = Arc::new(RecordingSigner::default());
        let router = build_router(settings, signer.clone(), environment);
        Self { router, signer }
    }

    /// Sends `POST /uploaded` with a raw body
    pub async fn post_uploaded(&self, body: &str) -> Response {
        let request = Request::builder()
            .uri("/uploaded")
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends a request with an arbitrary method and headers
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Builds the full application router around `signer`
pub fn build_router(
    settings: UploadSettings,
    signer: Arc<dyn UploadSigner>,
    environment: Environment,
) -> Router {
    setup_test_env();

    let upload_service = Arc::new(UploadService::new(
        settings,
        signer,
        Arc::new(StaticIdentity::default()),
        environment.presigned_url_expiry(),
    ));

    server::router(environment, upload_service)
}

pub const ONE_HOUR: Duration = Duration::from_secs(3600);
