//! Request tracing middleware for observability.
//!
//! Every request gets a request id (taken from `x-request-id` or generated),
//! a tracing span, a completion log line and request metrics.

use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Request ID header name for distributed tracing
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Metric label for requests that did not match any route (404 fallback)
pub const UNMATCHED_PATH_LABEL: &str = "unmatched";

pub async fn request_tracing(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    // 메트릭 라벨은 라우트 템플릿만 사용 (원시 URI는 로그에만)
    let route = metric_path_label(request.extensions().get::<MatchedPath>());

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        tracing::debug!("Request started");
        let start = Instant::now();

        let mut response = next.run(request).await;

        let duration = start.elapsed();
        let status = response.status().as_u16();

        tracing::info!(
            status,
            duration_ms = duration.as_millis() as u64,
            "Request completed"
        );

        record_request_metrics(&method, route, status, duration);

        response.headers_mut().insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_str(&request_id)
                .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
        );
        response
    }
    .instrument(span)
    .await
}

/// Record metrics for HTTP requests
fn record_request_metrics(method: &Method, path: String, status: u16, duration: Duration) {
    let method = method.to_string();
    let status = status.to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration.as_secs_f64());
}

/// Path label for metrics, bounded by the route table
fn metric_path_label(matched: Option<&MatchedPath>) -> String {
    matched
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn test_metric_path_label_without_match() {
        assert_eq!(metric_path_label(None), UNMATCHED_PATH_LABEL);
    }

    fn traced_router() -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn(request_tracing))
    }

    #[tokio::test]
    async fn should_generate_request_id_header() {
        let response = traced_router()
            .oneshot(axum::http::Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(Uuid::parse_str(header.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn should_propagate_incoming_request_id() {
        let response = traced_router()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/ping")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");
    }

    async fn echo_path_label(request: Request, next: Next) -> Response {
        let label = metric_path_label(request.extensions().get::<MatchedPath>());
        let mut response = next.run(request).await;
        response
            .headers_mut()
            .insert("x-path-label", HeaderValue::from_str(&label).unwrap());
        response
    }

    fn labelled_router() -> Router {
        Router::new()
            .route("/users/:id", get(|| async { "user" }))
            .fallback(|| async { axum::http::StatusCode::NOT_FOUND })
            .layer(axum::middleware::from_fn(echo_path_label))
    }

    async fn path_label_for(uri: &str) -> String {
        let response = labelled_router()
            .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        response.headers()["x-path-label"].to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn path_label_should_use_route_template() {
        assert_eq!(path_label_for("/users/42").await, "/users/:id");
        assert_eq!(path_label_for("/users/43").await, "/users/:id");
    }

    #[tokio::test]
    async fn path_label_should_collapse_unknown_paths() {
        assert_eq!(path_label_for("/random-1").await, UNMATCHED_PATH_LABEL);
        assert_eq!(path_label_for("/a/b/c/d").await, UNMATCHED_PATH_LABEL);
    }
}
