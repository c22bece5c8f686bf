mod common;

use std::collections::HashSet;

use axum::body::Body;
use axum::http::Request;
use backend::identity::PLACEHOLDER_USER_ID;
use backend::types::{Environment, UploadSettings, MAX_BODY_BYTES};
use common::*;
use common_types::DEFAULT_KEY_PREFIX;
use http::StatusCode;
use serde_json::json;

// Happy path tests

#[tokio::test]
async fn test_presign_happy_path() {
    let ctx = TestContext::new();

    let response = ctx
        .post_uploaded(&json!({ "filename": "integration-test.pdf" }).to_string())
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let url = body["url"].as_str().expect("url should be a string");
    let key = body["key"].as_str().expect("key should be a string");
    assert!(!url.is_empty());
    assert!(key.starts_with(DEFAULT_KEY_PREFIX));
    assert!(key.contains("integration-test") || key.contains("integration_test"));
    assert_eq!(body.as_object().unwrap().len(), 2);

    let calls = ctx.signer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].bucket, TEST_BUCKET);
    assert_eq!(calls[0].key, key);
    assert_eq!(calls[0].expires_in, ONE_HOUR);
}

#[tokio::test]
async fn test_presign_key_layout() {
    let ctx = TestContext::new();

    let response = ctx
        .post_uploaded(&json!({ "filename": "Lab Results (March).pdf" }).to_string())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let key = body["key"].as_str().unwrap();

    assert_eq!(
        filename_part(key, DEFAULT_KEY_PREFIX, PLACEHOLDER_USER_ID),
        "Lab_Results__March_.pdf"
    );
}

#[tokio::test]
async fn test_presign_strips_path_traversal() {
    let ctx = TestContext::new();

    for filename in ["../../etc/passwd", "..\\..\\etc\\passwd", "/abs/dir/passwd"] {
        let response = ctx
            .post_uploaded(&json!({ "filename": filename }).to_string())
            .await;
        assert_eq!(response.status(), StatusCode::OK, "filename {filename}");

        let body = parse_response_body(response).await;
        let key = body["key"].as_str().unwrap();
        let name = filename_part(key, DEFAULT_KEY_PREFIX, PLACEHOLDER_USER_ID);
        assert_eq!(name, "passwd");
        assert!(!key[DEFAULT_KEY_PREFIX.len()..].contains('/'));
    }
}

#[tokio::test]
async fn test_presign_falls_back_for_empty_basename() {
    let ctx = TestContext::new();

    let response = ctx
        .post_uploaded(&json!({ "filename": "folder/" }).to_string())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let key = body["key"].as_str().unwrap();
    assert_eq!(
        filename_part(key, DEFAULT_KEY_PREFIX, PLACEHOLDER_USER_ID),
        "upload"
    );
}

#[tokio::test]
async fn test_identical_requests_get_distinct_keys() {
    let ctx = TestContext::new();
    let payload = json!({ "filename": "same.pdf" }).to_string();

    let first = parse_response_body(ctx.post_uploaded(&payload).await).await;
    let second = parse_response_body(ctx.post_uploaded(&payload).await).await;

    assert_ne!(first["key"], second["key"]);
    assert_ne!(first["url"], second["url"]);
}

#[tokio::test]
async fn test_concurrent_requests_get_distinct_keys() {
    let ctx = TestContext::new();
    let payload = json!({ "filename": "same.pdf" }).to_string();

    let mut requests = tokio::task::JoinSet::new();
    for _ in 0..32 {
        let router = ctx.router.clone();
        let payload = payload.clone();
        requests.spawn(async move {
            let request = Request::builder()
                .uri("/uploaded")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(payload))
                .unwrap();
            let response = tower::ServiceExt::oneshot(router, request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            parse_response_body(response).await["key"]
                .as_str()
                .unwrap()
                .to_string()
        });
    }

    let keys: HashSet<String> = requests.join_all().await.into_iter().collect();
    assert_eq!(keys.len(), 32);
    assert_eq!(ctx.signer.calls().len(), 32);
}

#[tokio::test]
async fn test_presign_uses_configured_prefix() {
    let ctx = TestContext::with_settings(
        UploadSettings::new(TEST_BUCKET, TEST_REGION, "uploads/other/"),
        Environment::Test,
    );

    let response = ctx
        .post_uploaded(&json!({ "filename": "a.txt" }).to_string())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert!(body["key"].as_str().unwrap().starts_with("uploads/other/"));
}

// Validation error tests

#[tokio::test]
async fn test_presign_missing_filename() {
    let ctx = TestContext::new();

    let response = ctx.post_uploaded("{}").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "Missing or invalid \"filename\" in body");
    assert!(ctx.signer.calls().is_empty());
}

#[tokio::test]
async fn test_presign_empty_filename() {
    let ctx = TestContext::new();

    let response = ctx
        .post_uploaded(&json!({ "filename": "" }).to_string())
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "Missing or invalid \"filename\" in body");
}

#[tokio::test]
async fn test_presign_filename_wrong_type() {
    let ctx = TestContext::new();

    for payload in [
        json!({ "filename": 42 }),
        json!({ "filename": null }),
        json!({ "filename": ["a.pdf"] }),
        json!(["a.pdf"]),
    ] {
        let response = ctx.post_uploaded(&payload.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {payload}");
    }
}

#[tokio::test]
async fn test_presign_invalid_json() {
    let ctx = TestContext::new();

    let response = ctx.post_uploaded("not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "Invalid JSON body");
}

#[tokio::test]
async fn test_presign_empty_body_is_missing_filename() {
    let ctx = TestContext::new();

    let response = ctx.post_uploaded("").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "Missing or invalid \"filename\" in body");
}

// Server-side failures

#[tokio::test]
async fn test_missing_configuration_is_reported_first() {
    let mut settings = UploadSettings::new(TEST_BUCKET, TEST_REGION, DEFAULT_KEY_PREFIX);
    settings.region = None;
    let ctx = TestContext::with_settings(settings, Environment::Test);

    for body in [
        json!({ "filename": "a.pdf" }).to_string(),
        "not json".to_string(),
        "{}".to_string(),
    ] {
        let response = ctx.post_uploaded(&body).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_response_body(response).await;
        assert_eq!(body, json!({ "error": "Server configuration error" }));
    }
    assert!(ctx.signer.calls().is_empty());
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let ctx = TestContext::new();
    let body = json!({ "filename": "a.pdf", "pad": "x".repeat(MAX_BODY_BYTES + 6 * 1024) });

    let response = ctx.post_uploaded(&body.to_string()).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = parse_response_body(response).await;
    assert_eq!(body, json!({ "error": "Request body too large" }));
    assert!(ctx.signer.calls().is_empty());
}

#[tokio::test]
async fn test_oversized_body_reports_missing_configuration_first() {
    let mut settings = UploadSettings::new(TEST_BUCKET, TEST_REGION, DEFAULT_KEY_PREFIX);
    settings.bucket_name = None;
    let ctx = TestContext::with_settings(settings, Environment::Test);
    let body = json!({ "filename": "a.pdf", "pad": "x".repeat(MAX_BODY_BYTES + 6 * 1024) });

    let response = ctx.post_uploaded(&body.to_string()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_response_body(response).await;
    assert_eq!(body, json!({ "error": "Server configuration error" }));
}

#[tokio::test]
async fn test_signer_failure_is_internal_error() {
    let router = build_router(
        UploadSettings::new(TEST_BUCKET, TEST_REGION, DEFAULT_KEY_PREFIX),
        std::sync::Arc::new(backend::presign::testing::FailingSigner),
        Environment::Test,
    );

    let request = Request::builder()
        .uri("/uploaded")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "filename": "a.pdf" }).to_string()))
        .unwrap();
    let response = tower::ServiceExt::oneshot(router, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_response_body(response).await;
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

// Transport concerns

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .uri("/uploaded")
        .method("OPTIONS")
        .header("Origin", "https://viewer.example.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = ctx.send(request).await;

    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let methods = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn test_cors_header_on_errors() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .uri("/uploaded")
        .method("POST")
        .header("Origin", "https://viewer.example.com")
        .body(Body::from("not json"))
        .unwrap();
    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["semver"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_documents_uploaded_route() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .uri("/openapi.json")
        .body(Body::empty())
        .unwrap();
    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert!(body["paths"]["/uploaded"]["post"].is_object());
}

#[tokio::test]
async fn test_openapi_hidden_in_production() {
    let ctx = TestContext::with_settings(
        UploadSettings::new(TEST_BUCKET, TEST_REGION, DEFAULT_KEY_PREFIX),
        Environment::Production,
    );

    let request = Request::builder()
        .uri("/openapi.json")
        .body(Body::empty())
        .unwrap();
    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_docs_ui_hidden_in_production() {
    let ctx = TestContext::with_settings(
        UploadSettings::new(TEST_BUCKET, TEST_REGION, DEFAULT_KEY_PREFIX),
        Environment::Production,
    );

    let request = Request::builder()
        .uri("/docs")
        .body(Body::empty())
        .unwrap();
    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_docs_ui_served_in_development() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .uri("/docs")
        .body(Body::empty())
        .unwrap();
    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
}
