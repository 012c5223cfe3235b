//! /metrics 통합 테스트
//!
//! Prometheus 레코더는 프로세스 전역이므로 별도 테스트 바이너리에서 한 번만 설치합니다.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_openai::types::ChatCompletionRequestMessage;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusHandle;
use review_server::{
    create_router, domain::ai::AiService, error::AppError, global, AiClientTrait, AppState,
};
use tower::ServiceExt;

struct FixedClient;

#[async_trait::async_trait]
impl AiClientTrait for FixedClient {
    async fn complete(
        &self,
        _messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, AppError> {
        Ok("fine".to_string())
    }

    async fn check_connectivity(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<String, AppError> {
        Ok("ok".to_string())
    }
}

fn recorder() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| global::metrics::install_recorder().expect("recorder install"))
        .clone()
}

fn app() -> Router {
    let state = AppState::new(AiService::new(Arc::new(FixedClient))).with_metrics(recorder());
    create_router(state, Duration::from_secs(10))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn scrape(app: &Router) -> String {
    let response = app.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; version=0.0.4"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn metrics_should_expose_request_counters_and_histogram() {
    let app = app();

    let response = app
        .clone()
        .oneshot(get("/ai/get-ai-response?prompt=hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = scrape(&app).await;

    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains(r#"path="/ai/get-ai-response""#));
}

#[tokio::test]
async fn unknown_paths_should_share_one_series() {
    let app = app();

    for i in 0..50 {
        let response = app
            .clone()
            .oneshot(get(&format!("/unknown-path-{i}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let body = scrape(&app).await;
    let unmatched_series = body
        .lines()
        .filter(|line| line.starts_with("http_requests_total{"))
        .filter(|line| line.contains(r#"path="unmatched""#))
        .count();

    assert_eq!(unmatched_series, 1);
    assert!(!body.contains("unknown-path-"));
}
